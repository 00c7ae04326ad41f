//! scam-analyzer: builds the scoring pipeline and serves it over HTTP.
//!
//! Usage:
//!   scam-analyzer
//!   scam-analyzer --config analyzer.json --port 5000
//!   scam-analyzer --data-dir ./data --seed 7 --log-file scam_analyzer.log

use anyhow::{Context, Result};
use scam_analyzer::build_router;
use scamrisk_core::{AppConfig, AppContext};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = resolve_config(&args)?;
    init_logging(config.log_file.as_deref())?;

    let started = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
    log::info!("Starting Scam Analyzer API at {started}");
    println!("Current Date and Time (UTC): {started}");

    let bind_addr = config.bind_addr.clone();
    let ctx = AppContext::initialize(config)?;
    println!("  records:   {}", ctx.store().len());
    println!("  trees:     {}", ctx.model().n_trees());
    println!("  origin:    {:?}", ctx.store().origin());

    let app = build_router(Arc::new(ctx));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Cannot bind {bind_addr}"))?;
    println!("Starting server on http://{bind_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Config file (if given), then command-line overrides.
fn resolve_config(args: &[String]) -> Result<AppConfig> {
    let mut config = match flag_value(args, "--config") {
        Some(path) => AppConfig::load(Path::new(path))?,
        None => AppConfig::default(),
    };
    if let Some(dir) = flag_value(args, "--data-dir") {
        config = config.with_data_dir(Path::new(dir));
    }
    if let Some(path) = flag_value(args, "--source") {
        config.source_path = PathBuf::from(path);
    }
    if let Some(path) = flag_value(args, "--export") {
        config.export_path = PathBuf::from(path);
    }
    if let Some(path) = flag_value(args, "--log-file") {
        config.log_file = Some(PathBuf::from(path));
    }
    config.seed = parse_arg(args, "--seed", config.seed);
    if let Some(port) = flag_value(args, "--port").and_then(|p| p.parse::<u16>().ok()) {
        let host = config.bind_addr.rsplit_once(':').map_or("0.0.0.0", |(h, _)| h);
        config.bind_addr = format!("{host}:{port}");
    }
    Ok(config)
}

/// env_logger at `info` unless RUST_LOG says otherwise; optionally to a file.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - ScamAnalyzer - {} - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            record.level(),
            record.args()
        )
    });
    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
