use std::path::PathBuf;

use clap::Parser;

use session_markers::{config, log, server};

/// Session-side registry of source diagnostic markers, served over stdio
#[derive(Debug, Parser)]
#[command(name = "session-markers", version, about)]
struct Cli {
    /// Session scratch directory holding the persisted markers
    #[arg(long, value_name = "DIR")]
    scratch_dir: Option<PathBuf>,

    /// Log file (defaults to the data directory)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.unwrap_or_else(config::log_path);
    log::init(&log_path, &cli.log_level)?;

    let scratch_dir = cli.scratch_dir.unwrap_or_else(config::scratch_dir);
    server::run_server(&scratch_dir).await
}
