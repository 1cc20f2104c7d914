//! Verification Event Logger
//!
//! One structured event per stage of a verification request, emitted on the
//! `verification_events` target so it can be filtered or routed separately.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum VerificationEvent {
    OcrCompleted {
        provider: String,
        text_chars: usize,
    },
    OcrEmpty {
        provider: String,
    },
    OcrFailed {
        provider: String,
        error_msg: String,
    },
    Verified {
        overall_match: bool,
        failed_fields: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct VerificationLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: VerificationEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a verification event, redacting provider error text first.
    pub fn log_event(request_id: &str, mut event: VerificationEvent) {
        if let VerificationEvent::OcrFailed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }

        let entry = VerificationLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };

        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "verification_events", event = %json, "Verification event"),
            Err(_) => info!(target: "verification_events", event = ?entry, "Verification event"),
        }
    }
}
