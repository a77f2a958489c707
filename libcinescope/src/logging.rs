//! Centralized logging configuration for all Cinescope binaries
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - Logging to stderr or to a file (the TUI owns the terminal)
//!
//! # Examples
//!
//! ```no_run
//! use libcinescope::logging::{LoggingConfig, LogFormat};
//!
//! // Initialize with JSON format
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), false);
//! config.init();
//!
//! // Or read CINESCOPE_LOG_FORMAT and CINESCOPE_LOG_LEVEL
//! libcinescope::logging::config_from_env().init();
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
    /// Write to stderr when `file` cannot be opened
    pub stderr_fallback: bool,
}

/// Where log output ended up after `LoggingConfig::init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
    /// The log file could not be opened; carries the reason
    Discarded(String),
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl LoggingConfig {
    /// Create a new logging configuration
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `verbose` - If true, defaults to debug level
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
            file: None,
            stderr_fallback: true,
        }
    }

    /// Send log output to a file
    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.file = Some(path);
        self
    }

    /// Drop log output when the file cannot be opened instead of using stderr
    pub fn without_stderr_fallback(mut self) -> Self {
        self.stderr_fallback = false;
        self
    }

    fn make_writer(&self) -> (BoxMakeWriter, LogTarget) {
        if let Some(path) = &self.file {
            match open_log_file(path) {
                Ok(file) => return (BoxMakeWriter::new(Mutex::new(file)), LogTarget::File),
                Err(e) if !self.stderr_fallback => {
                    return (
                        BoxMakeWriter::new(std::io::sink),
                        LogTarget::Discarded(format!("{}: {}", path.display(), e)),
                    );
                }
                Err(e) => eprintln!("Cannot open log file {}: {}", path.display(), e),
            }
        }
        (BoxMakeWriter::new(std::io::stderr), LogTarget::Stderr)
    }

    /// Initialize logging with the configured settings
    ///
    /// This should be called once at the start of your program. Calling it
    /// again is harmless; the first subscriber stays installed.
    pub fn init(&self) -> LogTarget {
        use tracing_subscriber::EnvFilter;

        let filter = if self.verbose {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
        };

        let (writer, target) = self.make_writer();
        let to_terminal = target == LogTarget::Stderr;

        let result = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(to_terminal)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_level(true)
                .try_init(),
        };

        if result.is_err() {
            tracing::debug!("Logging subscriber already installed");
        }
        target
    }
}

/// Build a logging configuration from the environment
///
/// Respects `CINESCOPE_LOG_FORMAT` and `CINESCOPE_LOG_LEVEL`.
/// Falls back to text format with info level if not set.
pub fn config_from_env() -> LoggingConfig {
    let format = std::env::var("CINESCOPE_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("CINESCOPE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        // Case insensitive
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_from_str_invalid() {
        let result = "invalid".parse::<LogFormat>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid log format: 'invalid'"));
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Text.to_string(), "text");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
    }

    #[test]
    fn test_with_file_sets_target() {
        let config = LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_file(PathBuf::from("/tmp/cine.log"));
        assert_eq!(config.file, Some(PathBuf::from("/tmp/cine.log")));
    }

    #[test]
    fn test_file_writer_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_file(dir.path().join("logs").join("cine.log"));

        let (_, target) = config.make_writer();
        assert_eq!(target, LogTarget::File);
        assert!(dir.path().join("logs").join("cine.log").exists());
    }

    #[test]
    fn test_unopenable_file_without_fallback_discards() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let config = LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_file(blocker.join("cine.log"))
            .without_stderr_fallback();

        let (_, target) = config.make_writer();
        assert!(matches!(target, LogTarget::Discarded(reason) if reason.contains("not-a-dir")));
    }

    #[test]
    fn test_unopenable_file_falls_back_to_stderr_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let config = LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_file(blocker.join("cine.log"));

        let (_, target) = config.make_writer();
        assert_eq!(target, LogTarget::Stderr);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var("CINESCOPE_LOG_FORMAT", "json");
        std::env::set_var("CINESCOPE_LOG_LEVEL", "warn");
        let config = config_from_env();
        std::env::remove_var("CINESCOPE_LOG_FORMAT");
        std::env::remove_var("CINESCOPE_LOG_LEVEL");

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "warn");
        assert!(!config.verbose);
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        std::env::remove_var("CINESCOPE_LOG_FORMAT");
        std::env::remove_var("CINESCOPE_LOG_LEVEL");
        let config = config_from_env();

        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level, "info");
    }
}
