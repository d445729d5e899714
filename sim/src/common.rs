//! Common utility functions for the simulator binary.
//!
//! This module contains:
//! - Logger initialization
//! - Output path validation
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Initialize the logger with the specified configuration.
///
/// # Arguments
/// * `log_level` - Log level string (off, error, warn, info, debug, trace)
/// * `log_file` - Optional path to log file (logs to stderr if None)
///
/// # Errors
/// Returns an error if the log file cannot be opened or logger initialization fails.
pub fn init_logger(log_level: &str, log_file: Option<&PathBuf>) -> Result<()> {
    use std::io::Write;

    let level = log_level.parse::<log::LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
        log::LevelFilter::Info
    });

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });

    if let Some(log_path) = log_file {
        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory '{}'", parent.display()))?;
        }
        let target = Box::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .with_context(|| format!("opening log file '{}'", log_path.display()))?,
        );
        builder.target(env_logger::Target::Pipe(target));
    }

    builder.try_init().context("initializing logger")?;
    Ok(())
}

/// Validate a CSV output file path and create its parent directories if needed.
///
/// # Errors
/// Returns an error if the path does not end in `.csv`, points at a directory, or the
/// parent directory cannot be created.
pub fn validate_output_file(output: &Path) -> Result<()> {
    if output.is_dir() {
        bail!("Output path '{}' is a directory.", output.display());
    }
    if output.extension().and_then(|s| s.to_str()) != Some("csv") {
        bail!("Output file '{}' is not a CSV file.", output.display());
    }
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Whether `path` has an extension the configuration loader understands.
pub fn is_config_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .as_deref(),
        Some("json") | Some("yaml") | Some("yml") | Some("toml")
    )
}
