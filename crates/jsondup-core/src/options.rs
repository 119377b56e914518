//! 扫描选项与统计信息（模块）
use serde::Deserialize;

use crate::error::ConfigError;
use crate::findings::KeyScope;

/// 默认只收集目录中的 `.json` 文件
pub const DEFAULT_INCLUDE: &str = r"\.json$";

/// 输出格式
/// - Text：逐文档的人类可读文本块
/// - Json：流式写出的 JSON 数组，每个文档一个元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::Value { field: "format", value: s.to_string() }),
        }
    }
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 重复键的合并方式
    pub scope: KeyScope,
    /// 输出格式
    pub format: OutputFormat,
    /// 展开目录时文件名需匹配的正则
    pub include: String,
    /// 是否递归进入子目录；false 时只看目录第一层
    pub recursive: bool,
    /// 最大文件大小（字节）；超过则报告为错误而不读取
    pub max_file_size: Option<u64>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            scope: KeyScope::Flattened,
            format: OutputFormat::Text,
            include: DEFAULT_INCLUDE.to_string(),
            recursive: true,
            max_file_size: None,
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub documents_scanned: usize,
    pub documents_failed: usize,
    pub documents_with_duplicates: usize,
    pub duplicates_found: usize,
}
