use std::fs::OpenOptions;
use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::prelude::*;

/// Installs the JSON file logger.
///
/// stdout carries the RPC stream, so nothing is ever logged there. The level
/// comes from `RUST_LOG`, or `default_level` when it is unset or invalid.
pub fn init(log_path: &Path, default_level: &str) -> anyhow::Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).inspect_err(|e| {
            eprintln!("Failed to create log directory {:?}: {}", parent, e);
        })?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .inspect_err(|e| {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
        })?;

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(log_file)
        .fmt_fields(JsonFields::default());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .try_init()?;

    Ok(())
}
