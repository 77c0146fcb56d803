//! Logging infrastructure - structured tracing for the extension
//!
//! Design: Uses `tracing` for structured, contextual logging with:
//! - Level and filter from config or environment
//! - Human-readable or JSON console output
//! - Optional file sink through a non-blocking appender
//! - Idempotent initialization

use once_cell::sync::OnceCell;
use std::io;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

mod macros;
pub use macros::*;

/// Global logging state (holds the file writer guard, if any)
static LOGGER: OnceCell<Option<WorkerGuard>> = OnceCell::new();

const DEFAULT_LOG_FILE: &str = "lovely_sets.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default log level
    pub level: Level,
    /// Log file path (file output disabled when `None`)
    pub log_path: Option<PathBuf>,
    /// Enable JSON format (vs human-readable)
    pub json_format: bool,
    /// Show span events (enter/exit)
    pub show_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_path: None,
            json_format: false,
            show_spans: false,
        }
    }
}

impl LogConfig {
    /// Create config from the `[logging]` section of the extension config
    pub fn from_settings(settings: &LoggingConfig) -> Self {
        Self {
            level: parse_level(&settings.level).unwrap_or(Level::INFO),
            log_path: settings.file.clone(),
            json_format: settings.json,
            show_spans: settings.spans,
        }
    }

    /// Apply environment overrides on top of this config
    pub fn with_env(mut self) -> Self {
        // LOVELY_SETS_LOG_LEVEL: trace, debug, info, warn, error
        if let Some(level) = std::env::var("LOVELY_SETS_LOG_LEVEL")
            .ok()
            .and_then(|s| parse_level(&s))
        {
            self.level = level;
        }

        // LOVELY_SETS_LOG_FILE: path to log file
        if let Ok(path) = std::env::var("LOVELY_SETS_LOG_FILE") {
            self.log_path = Some(PathBuf::from(path));
        }

        if std::env::var("LOVELY_SETS_LOG_JSON").is_ok() {
            self.json_format = true;
        }

        if std::env::var("LOVELY_SETS_LOG_SPANS").is_ok() {
            self.show_spans = true;
        }

        self
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Create debug config (verbose logging)
    pub fn debug() -> Self {
        Self {
            level: Level::TRACE,
            log_path: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            json_format: false,
            show_spans: true,
        }
    }
}

fn parse_level(s: &str) -> Option<Level> {
    s.trim().parse().ok()
}

/// Initialize logging with default configuration
pub fn init() {
    init_with_config(LogConfig::from_env());
}

/// Initialize logging with custom configuration.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init_with_config(config: LogConfig) {
    LOGGER.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "lovely_sets={}",
                config.level.as_str().to_lowercase()
            ))
        });

        let span_events = if config.show_spans {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let json_layer = config.json_format.then(|| {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(span_events.clone())
        });

        let text_layer = (!config.json_format).then(|| {
            fmt::layer()
                .with_writer(io::stderr)
                .with_span_events(span_events.clone())
                .with_target(true)
                .with_line_number(cfg!(debug_assertions))
        });

        // An unusable log file disables the file sink instead of failing init.
        let appender = config.log_path.as_deref().map(|path| (path, file_appender(path)));
        let mut file_error = None;

        let (file_layer, guard) = match appender {
            Some((_, Ok(appender))) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_span_events(span_events);
                (Some(layer), Some(guard))
            }
            Some((path, Err(err))) => {
                file_error = Some((path.to_path_buf(), err));
                (None, None)
            }
            None => (None, None),
        };

        // Another subscriber may already be installed by the host process.
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .with(text_layer)
            .with(file_layer)
            .try_init();

        if let Some((path, err)) = file_error {
            warn!(
                event = "log_file_unavailable",
                path = %path.display(),
                error = %err,
                "File logging disabled"
            );
        }

        guard
    });
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, InitError> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.into());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

// ============================================================================
// Extension-specific logging functions
// ============================================================================

/// Log FFI function call
pub fn log_ffi_call(fn_name: &str) {
    trace!(event = "ffi_call", function = fn_name, "FFI function called");
}

/// Log FFI error
pub fn log_ffi_error(fn_name: &str, error: &str) {
    error!(
        event = "ffi_error",
        function = fn_name,
        error = error,
        "FFI function error"
    );
}
