//! Telemetry and structured logging for the label verification service.
//!
//! Handles credential redaction, JSON file output with daily rotation, and
//! per-request verification events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogger, VerificationEvent, VerificationLogEntry};
pub use logger::{init_logger, LoggerConfig};
pub use redact::redact_sensitive_data;
