//! 配置文件加载（TOML）
//!
//! 所有字段可选；命令行参数优先于文件中的值。
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::findings::KeyScope;
use crate::options::{OutputFormat, ScanOptions};

/// 未显式指定时尝试加载的配置文件
pub const DEFAULT_CONFIG_PATH: &str = "./jsondup.toml";

/// 配置文件结构
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    #[serde(default)]
    pub scope: Option<KeyScope>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub include: Option<String>,
    #[serde(default)]
    pub recursive: Option<bool>,
    #[serde(default)]
    pub max_file_size: Option<u64>,
    /// 任一文档失败时以非零状态退出
    #[serde(default)]
    pub strict: Option<bool>,
}

impl ScanConfig {
    pub fn from_toml(path: &Path, txt: &str) -> Result<Self, ConfigError> {
        toml::from_str(txt).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// 在默认选项上叠加文件中出现的字段
    pub fn apply(&self, opts: &mut ScanOptions) {
        if let Some(s) = self.scope { opts.scope = s; }
        if let Some(f) = self.format { opts.format = f; }
        if let Some(i) = &self.include { opts.include = i.clone(); }
        if let Some(r) = self.recursive { opts.recursive = r; }
        if self.max_file_size.is_some() { opts.max_file_size = self.max_file_size; }
    }
}

/// 加载配置：显式路径必须存在；未指定时仅在默认文件存在时加载
pub fn load_config(explicit: Option<&Path>) -> Result<ScanConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !p.is_file() { return Ok(ScanConfig::default()); }
            p
        }
    };
    let txt = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: path.clone(), source })?;
    ScanConfig::from_toml(&path, &txt)
}
