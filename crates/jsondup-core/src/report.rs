//! 报告输出（文本 / 流式 JSON 数组）
use serde::Serialize;
use std::io::{self, Write};

use crate::error::DocumentError;
use crate::findings::KeyScope;
use crate::options::OutputFormat;
use crate::types::{DocumentReport, DuplicateFinding, ScanResult};

/// JSON 输出中的单个元素
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    locator: String,
    status: &'static str,
    findings: &'a [DuplicateFinding],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

/// JSON 输出中的错误对象；各类错误都带 `kind` 与 `message`，其余字段按类型出现
#[derive(Debug, Serialize)]
struct JsonError {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u64>,
}

impl From<&DocumentError> for JsonError {
    fn from(e: &DocumentError) -> Self {
        let mut out = JsonError { kind: e.kind(), message: e.message(), line: None, column: None, size: None, limit: None };
        match *e {
            DocumentError::Syntax { line, column, .. } => {
                out.line = Some(line);
                out.column = Some(column);
            }
            DocumentError::TooLarge { size, limit } => {
                out.size = Some(size);
                out.limit = Some(limit);
            }
            DocumentError::Io { .. } => {}
        }
        out
    }
}

/// 按文档逐个写出报告；JSON 模式下负责数组的起止符与分隔符
pub(crate) struct ReportWriter<'w> {
    out: &'w mut dyn Write,
    format: OutputFormat,
    scope: KeyScope,
    first: bool,
}

impl<'w> ReportWriter<'w> {
    pub(crate) fn begin(out: &'w mut dyn Write, format: OutputFormat, scope: KeyScope) -> io::Result<Self> {
        if format == OutputFormat::Json { write!(out, "[")?; }
        Ok(Self { out, format, scope, first: true })
    }

    pub(crate) fn write(&mut self, report: &DocumentReport) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => write_text(&mut *self.out, report, self.scope),
            OutputFormat::Json => {
                if !self.first { write!(self.out, ",")?; } else { self.first = false; }
                let item = JsonReport {
                    locator: report.locator.display().to_string(),
                    status: if report.result.is_success() { "ok" } else { "error" },
                    findings: report.result.findings(),
                    error: match &report.result {
                        ScanResult::ParseError(e) => Some(JsonError::from(e)),
                        ScanResult::Success(_) => None,
                    },
                };
                serde_json::to_writer(&mut *self.out, &item).map_err(io::Error::from)
            }
        }
    }

    pub(crate) fn finish(self) -> io::Result<()> {
        if self.format == OutputFormat::Json { writeln!(self.out, "]")?; }
        self.out.flush()
    }
}

/// 文本块：重复列表 / 无重复 / 解析错误，三者必居其一
pub fn write_text(out: &mut dyn Write, report: &DocumentReport, scope: KeyScope) -> io::Result<()> {
    let locator = report.locator.display();
    match &report.result {
        ScanResult::ParseError(e) => writeln!(out, "Error parsing {}: {}", locator, e.message()),
        ScanResult::Success(findings) if findings.is_empty() => writeln!(out, "No duplicates found in {}", locator),
        ScanResult::Success(findings) => {
            writeln!(out, "Duplicate keys found in {}:", locator)?;
            for f in findings {
                match (scope, f.path.as_deref()) {
                    (KeyScope::PathScoped, Some(p)) => {
                        let shown = if p.is_empty() { "/" } else { p };
                        match f.instance {
                            Some(n) if n > 1 => writeln!(out, " - {} (at {}, #{})", f.key, shown, n)?,
                            _ => writeln!(out, " - {} (at {})", f.key, shown)?,
                        }
                    }
                    _ => writeln!(out, " - {}", f.key)?,
                }
            }
            Ok(())
        }
    }
}
