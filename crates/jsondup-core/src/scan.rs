//! 扫描主流程
use anyhow::{Context, Result};
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{ConfigError, DocumentError};
use crate::findings::{summarize, KeyScope};
use crate::options::{ScanOptions, ScanStats};
use crate::parser::collect_object_literals;
use crate::report::ReportWriter;
use crate::types::{Document, DocumentReport, ScanResult};

/// 扫描一段 JSON 文本
pub fn scan_str(text: &str, scope: KeyScope) -> ScanResult {
    scan_bytes(text.as_bytes(), scope)
}

/// 扫描已读入的文档；无副作用，可重入
pub fn scan_document(doc: &Document, opts: &ScanOptions) -> ScanResult {
    scan_bytes(doc.raw_content(), opts.scope)
}

fn scan_bytes(bytes: &[u8], scope: KeyScope) -> ScanResult {
    match collect_object_literals(bytes) {
        Ok(literals) => ScanResult::Success(summarize(&literals, scope)),
        Err(e) => ScanResult::ParseError(e),
    }
}

/// 整读单个文件；超过大小上限时不读取
pub fn load_document(locator: &Path, opts: &ScanOptions) -> Result<Document, DocumentError> {
    if let Some(limit) = opts.max_file_size {
        let md = std::fs::metadata(locator).map_err(|e| DocumentError::io(&e))?;
        if md.is_file() && md.len() > limit {
            return Err(DocumentError::TooLarge { size: md.len(), limit });
        }
    }
    let raw = std::fs::read(locator).map_err(|e| DocumentError::io(&e))?;
    Ok(Document::new(locator, raw))
}

/// 展开定位符：文件原样保留（即使不存在，以便报告错误），目录按 include 规则收集并排序
pub fn resolve_locators(locators: &[PathBuf], opts: &ScanOptions) -> Result<Vec<PathBuf>, ConfigError> {
    let include = Regex::new(&opts.include)
        .map_err(|source| ConfigError::Include { pattern: opts.include.clone(), source })?;
    let mut out = Vec::new();
    for loc in locators {
        if !loc.is_dir() {
            out.push(loc.clone());
            continue;
        }
        let mut walker = WalkDir::new(loc).min_depth(1);
        if !opts.recursive { walker = walker.max_depth(1); }
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => { warn!(error = %e, "skipping unreadable entry"); continue; }
            };
            if !entry.file_type().is_file() { continue; }
            let matched = entry.file_name().to_str().map(|n| include.is_match(n)).unwrap_or(false);
            if matched { files.push(entry.into_path()); }
        }
        // 按路径排序，确保输出顺序稳定
        files.sort();
        debug!(dir = %loc.display(), files = files.len(), "expanded directory");
        out.extend(files);
    }
    Ok(out)
}

/// 扫描全部定位符并写出报告
/// - 每个文档独立处理，单个文档失败不影响其余文档
/// - 输出顺序与定位符（展开后）顺序一致
pub fn scan_and_write(locators: &[PathBuf], out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let files = resolve_locators(locators, opts)?;
    info!(documents = files.len(), scope = ?opts.scope, "scanning documents");

    let mut stats = ScanStats::default();
    let mut writer = ReportWriter::begin(out, opts.format, opts.scope).context("write report header")?;
    for path in files {
        let report = match load_document(&path, opts) {
            Ok(doc) => DocumentReport { locator: doc.locator().to_path_buf(), result: scan_document(&doc, opts) },
            Err(e) => DocumentReport { locator: path, result: ScanResult::ParseError(e) },
        };
        stats.documents_scanned += 1;
        match &report.result {
            ScanResult::ParseError(e) => {
                stats.documents_failed += 1;
                warn!(document = %report.locator.display(), error = %e, "document failed");
            }
            ScanResult::Success(findings) => {
                if !findings.is_empty() { stats.documents_with_duplicates += 1; }
                stats.duplicates_found += findings.len();
                debug!(document = %report.locator.display(), duplicates = findings.len(), "document scanned");
            }
        }
        writer.write(&report).context("write report")?;
    }
    writer.finish().context("flush report")?;
    Ok(stats)
}
