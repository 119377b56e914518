//! 错误类型
//!
//! - `DocumentError`：单个文档的失败（语法错误、读取失败、超出大小），只影响该文档，不会中断整批扫描。
//! - `ConfigError`：运行级错误（配置文件/包含规则），由 CLI 以 anyhow 向上抛出。
use std::path::PathBuf;
use thiserror::Error;

/// 单文档失败（对应输出中的 `Error parsing <locator>: <message>`）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// JSON 语法错误；message 为 serde_json 的原始描述（已含行列号）
    #[error("{message}")]
    Syntax { message: String, line: usize, column: usize },
    /// 文件无法读取（不存在、无权限、是目录等）
    #[error("{message}")]
    Io { message: String },
    /// 超过 `max_file_size`，未读取
    #[error("document is {size} bytes, exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

impl DocumentError {
    /// 面向用户的错误文本
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// JSON 输出中的 `kind` 字段
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentError::Syntax { .. } => "syntax",
            DocumentError::Io { .. } => "io",
            DocumentError::TooLarge { .. } => "too_large",
        }
    }

    pub(crate) fn io(err: &std::io::Error) -> Self {
        DocumentError::Io { message: err.to_string() }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Syntax { message: err.to_string(), line: err.line(), column: err.column() }
    }
}

/// 运行级配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid config file {path}: {source}")]
    Parse { path: PathBuf, #[source] source: toml::de::Error },
    #[error("invalid include pattern {pattern:?}: {source}")]
    Include { pattern: String, #[source] source: regex::Error },
    #[error("unknown {field} value {value:?}")]
    Value { field: &'static str, value: String },
}
