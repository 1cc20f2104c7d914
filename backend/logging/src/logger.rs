//! Structured Logger
//!
//! Console output as text or JSON, an optional daily-rotated NDJSON file named
//! after the service, and `RUST_LOG`-based level control.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// How the service wants its logs.
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig<'a> {
    /// Prefix of the rolling log file.
    pub service: &'a str,
    /// Filter used when `RUST_LOG` is unset.
    pub level: &'a str,
    /// Enables the rolling JSON file when set.
    pub log_dir: Option<&'a Path>,
    /// Emit console lines as JSON instead of text.
    pub json_console: bool,
}

impl<'a> LoggerConfig<'a> {
    pub fn new(service: &'a str, level: &'a str) -> Self {
        Self {
            service,
            level,
            log_dir: None,
            json_console: false,
        }
    }

    /// Name of the rolling file; rotation appends `.YYYY-MM-DD`.
    pub fn file_prefix(&self) -> String {
        format!("{}.log", self.service)
    }

    /// A bare level such as `debug` applies to everything; anything else is
    /// taken as a full filter directive.
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the global structured logger. Calling this more than once is a
/// no-op.
pub fn init_logger(config: &LoggerConfig<'_>) {
    let file_layer = config.log_dir.map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, config.file_prefix());
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let (text_console, json_console) = if config.json_console {
        (None, Some(fmt::layer().json().with_writer(std::io::stdout)))
    } else {
        (
            Some(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(false)
                    .with_ansi(true),
            ),
            None,
        )
    };

    let _ = tracing_subscriber::registry()
        .with(config.filter())
        .with(text_console)
        .with(json_console)
        .with(file_layer)
        .try_init();

    tracing::debug!(service = config.service, "Logger initialized");
}
