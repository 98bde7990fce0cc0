//! Logging system configuration and initialization
//!
//! This module provides the logging setup for both command-line pipelines:
//! - Console output on stderr (stdout carries the human-readable run summary)
//! - Optional file output, plain or JSON
//! - Configuration based log level with `RUST_LOG` override
//! - Timestamps in a configurable fixed UTC offset

use anyhow::{Result, anyhow};
use chrono::{FixedOffset, Offset, Utc};
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;

// Global guard to keep the log file writer alive
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(Vec::new());
}

/// Time formatter for a fixed offset from UTC
#[derive(Debug, Clone, Copy)]
struct OffsetTimeFormatter {
    offset: FixedOffset,
}

impl OffsetTimeFormatter {
    fn new(hours: i32) -> Self {
        let offset = hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }
}

impl FormatTime for OffsetTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now().with_timezone(&self.offset);
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f %:z"))
    }
}

/// Get the log directory relative to the executable location
pub fn get_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Build the filter: `RUST_LOG` wins, otherwise the configured level with
/// HTTP client internals suppressed unless tracing
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))?;

    if !config.level.to_lowercase().contains("trace") {
        for directive in ["reqwest=info", "hyper=warn", "hyper_util=warn", "h2=warn", "rustls=warn"] {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    Ok(filter)
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize logging with custom configuration
///
/// # Environment Variable Override
/// ```bash
/// # Show HTTP request details while pushing
/// RUST_LOG="debug,reqwest=debug" push_catalog
/// ```
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(config)?;
    let timer = OffsetTimeFormatter::new(config.utc_offset_hours);
    let registry = Registry::default().with(env_filter);

    let console_layer = config.console_output.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(timer)
            .with_target(false)
    });

    let mut log_path = None;
    let (plain_file_layer, json_file_layer) = if config.file_output {
        let log_dir = config.log_directory.clone().unwrap_or_else(get_log_directory);
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;

        let file_appender = rolling::never(&log_dir, &config.file_name);
        let (file_writer, file_guard) = non_blocking(file_appender);

        // Store the guard globally to prevent it from being dropped
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(file_guard);
        log_path = Some(log_dir.join(&config.file_name));

        if config.json_format {
            let layer = fmt::Layer::new()
                .json()
                .with_writer(file_writer)
                .with_timer(timer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false);
            (None, Some(layer))
        } else {
            let layer = fmt::Layer::new()
                .with_writer(file_writer)
                .with_timer(timer)
                .with_target(false)
                .with_ansi(false);
            (Some(layer), None)
        }
    } else {
        (None, None)
    };

    if console_layer.is_none() && !config.file_output {
        return Err(anyhow!("No logging output configured"));
    }

    registry
        .with(console_layer)
        .with(plain_file_layer)
        .with(json_file_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    info!("Logging system initialized (level: {})", config.level);
    if let Some(path) = log_path {
        info!("Log file: {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.level.is_empty());
        assert!(config.console_output);
        assert_eq!(config.utc_offset_hours, 7);
    }

    #[test]
    fn test_log_directory_creation() {
        let log_dir = get_log_directory();
        assert!(log_dir.to_string_lossy().ends_with("logs"));
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let formatter = OffsetTimeFormatter::new(48);
        assert_eq!(formatter.offset.local_minus_utc(), 0);
        assert_eq!(OffsetTimeFormatter::new(7).offset.local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_huge_offset_does_not_overflow() {
        assert_eq!(OffsetTimeFormatter::new(i32::MAX).offset.local_minus_utc(), 0);
        assert_eq!(OffsetTimeFormatter::new(i32::MIN).offset.local_minus_utc(), 0);
    }

    #[test]
    fn test_no_output_is_rejected() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..LoggingConfig::default()
        };
        assert!(init_logging_with_config(&config).is_err());
    }
}
