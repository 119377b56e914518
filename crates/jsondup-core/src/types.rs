//! 公共类型（对外暴露）
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::DocumentError;

/// 待扫描文档：定位符 + 一次性读入的原始内容，读入后不再修改
#[derive(Debug, Clone)]
pub struct Document {
    locator: PathBuf,
    raw_content: Vec<u8>,
}

impl Document {
    pub fn new(locator: impl Into<PathBuf>, raw_content: impl Into<Vec<u8>>) -> Self {
        Self { locator: locator.into(), raw_content: raw_content.into() }
    }

    pub fn locator(&self) -> &Path {
        &self.locator
    }

    pub fn raw_content(&self) -> &[u8] {
        &self.raw_content
    }
}

/// 单个对象字面量内出现 ≥2 次的键
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateFinding {
    pub key: String,
    /// 在单个对象字面量内的出现次数（展平模式下取各字面量中的最大值）
    #[serde(rename = "count")]
    pub occurrence_count: usize,
    /// 该键重复出现的对象字面量个数（按路径区分模式下恒为 1）
    pub objects: usize,
    /// 对象字面量的 JSON Pointer；仅按路径区分模式下存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// 同一 Pointer 下第几个对象字面量（从 1 开始）；仅按路径区分模式下存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<usize>,
}

/// 单文档扫描结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    /// 解析成功；空列表表示没有重复键
    Success(Vec<DuplicateFinding>),
    /// 文档无法解析（或无法读取），携带原因
    ParseError(DocumentError),
}

impl ScanResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ScanResult::Success(_))
    }

    /// 成功时返回发现列表，失败时为空
    pub fn findings(&self) -> &[DuplicateFinding] {
        match self {
            ScanResult::Success(f) => f,
            ScanResult::ParseError(_) => &[],
        }
    }

    pub fn has_duplicates(&self) -> bool {
        !self.findings().is_empty()
    }
}

/// 输出单元：一个定位符对应一个结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub locator: PathBuf,
    pub result: ScanResult,
}
