//! App configuration.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory cart documents are stored under
    #[arg(long, env = "THEKA_DATA_DIR", default_value = ".theka")]
    pub data_dir: PathBuf,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line human-readable output.
    Compact,
    /// Structured JSON output.
    Json,
}

/// Logging output settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "THEKA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "THEKA_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
