use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsondup_core::{load_config, scan_and_write, KeyScope, OutputFormat, ScanOptions};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// `--strict` 且存在失败文档时的退出码
const EXIT_DOCUMENT_FAILED: u8 = 2;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "jsondup", version, about = "检测 JSON 文档中同一对象内的重复键")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描一个或多个 JSON 文件（目录会展开为其中的 .json 文件）
    Scan {
        /// 文档路径，可为文件或目录；为空时不做任何扫描
        locators: Vec<PathBuf>,

        /// 合并方式：flattened（同名键合并）或 path（按对象路径区分）
        #[arg(long, value_parser = ["flattened", "flat", "path", "path_scoped"])]
        scope: Option<String>,

        /// 输出格式：text 或 json
        #[arg(long, value_parser = ["text", "json"])]
        format: Option<String>,

        /// 展开目录时文件名需匹配的正则，默认 \.json$
        #[arg(long)]
        include: Option<String>,

        /// 展开目录时不进入子目录
        #[arg(long)]
        no_recursive: bool,

        /// 最大文件大小（单位字节）；超过则报告为错误
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 任一文档解析/读取失败时以非零状态退出
        #[arg(long)]
        strict: bool,

        /// 配置文件路径（TOML），默认尝试 ./jsondup.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { locators, scope, format, include, no_recursive, max_file_size, strict, config } => {
            // 先叠加配置文件，再由命令行参数覆盖
            let file_cfg = load_config(config.as_deref()).context("load config")?;
            let mut opts = ScanOptions::default();
            file_cfg.apply(&mut opts);
            if let Some(s) = scope { opts.scope = s.parse::<KeyScope>()?; }
            if let Some(f) = format { opts.format = f.parse::<OutputFormat>()?; }
            if let Some(i) = include { opts.include = i; }
            if no_recursive { opts.recursive = false; }
            if max_file_size.is_some() { opts.max_file_size = max_file_size; }
            let strict = strict || file_cfg.strict.unwrap_or(false);

            info!(documents = locators.len(), ?opts, "starting scan");

            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let stats = scan_and_write(&locators, &mut out, &opts).context("scan and write failed")?;

            info!(
                documents_scanned = stats.documents_scanned,
                documents_failed = stats.documents_failed,
                duplicates_found = stats.duplicates_found,
                "scan finished"
            );

            if strict && stats.documents_failed > 0 {
                return Ok(ExitCode::from(EXIT_DOCUMENT_FAILED));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只保留扫描报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
