//! JSON 重复键扫描库
//!
//! 设计要点：
//! - 标准 JSON 解码会静默地让重复键“后者覆盖前者”，因此不能先解析成 Map 再检查。
//! - 通过 serde 的 Visitor 在解析过程中拿到每个对象字面量的原始键序列（含重复），逐个计数。
//! - 各对象字面量的结果再按 `KeyScope` 合并为文档级结果（展平或按 JSON Pointer 区分）。
//! - 单个文档的失败（语法错误、读取失败）只体现在该文档的结果中，不会中断整批扫描。

mod config;
mod error;
mod findings;
mod options;
mod parser;
mod report;
mod scan;
mod types;

pub use config::{load_config, ScanConfig, DEFAULT_CONFIG_PATH};
pub use error::{ConfigError, DocumentError};
pub use findings::KeyScope;
pub use options::{OutputFormat, ScanOptions, ScanStats, DEFAULT_INCLUDE};
pub use report::write_text;
pub use scan::{load_document, resolve_locators, scan_and_write, scan_document, scan_str};
pub use types::{Document, DocumentReport, DuplicateFinding, ScanResult};
