//! `POST /api/verify`: upload → OCR → verification → JSON.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use labelcheck_core::{verify, FieldCheck};
use labelcheck_understanding::OcrOutcome;
use logging::{EventLogger, VerificationEvent};

use crate::attachments::{read_verify_form, FormInput};
use crate::error::ApiError;
use crate::server::GatewayState;

pub const NO_TEXT_MESSAGE: &str = "No text could be extracted from the image.";

/// Longest `extracted_text` preview returned to the client, in characters.
pub const EXTRACTED_TEXT_PREVIEW_CHARS: usize = 300;

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub overall_match: bool,
    pub discrepancies: Vec<FieldCheck>,
    pub extracted_text: String,
    pub form_input: FormInput,
}

#[derive(Debug, Serialize)]
pub struct NoTextResponse {
    pub success: bool,
    pub overall_match: bool,
    pub error: &'static str,
    pub extracted_text: &'static str,
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub async fn verify_label(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let multipart = match multipart {
        Ok(multipart) => multipart,
        // No multipart boundary: empty, urlencoded or JSON bodies carry no file.
        Err(MultipartRejection::InvalidBoundary(_)) => {
            warn!(request_id = %request_id, "Verification request is not multipart");
            return Err(ApiError::MissingImage);
        }
        Err(rejection) => return Err(ApiError::Upload(rejection.body_text())),
    };

    let form = read_verify_form(multipart, &state.upload_dir).await?;
    let Some(upload) = form.image else {
        warn!(request_id = %request_id, "Verification request without an image");
        return Err(ApiError::MissingImage);
    };

    let provider = state.ocr.name().to_string();
    info!(
        request_id = %request_id,
        provider = %provider,
        file = %upload.original_name,
        content_type = upload.content_type.as_deref().unwrap_or("unknown"),
        size = upload.size_bytes,
        "Running OCR on label image"
    );
    let image = upload.read().await?;
    let outcome = match state.ocr.detect_text(&image).await {
        Ok(outcome) => outcome,
        Err(err) => {
            EventLogger::log_event(
                &request_id,
                VerificationEvent::OcrFailed {
                    provider,
                    error_msg: format!("{err:#}"),
                },
            );
            return Err(ApiError::Processing(err));
        }
    };
    // The staged image is no longer needed once the provider has answered.
    drop(upload);

    let text = match outcome {
        OcrOutcome::Text(text) => text,
        OcrOutcome::NoDetections => {
            EventLogger::log_event(&request_id, VerificationEvent::OcrEmpty { provider });
            return Ok(Json(NoTextResponse {
                success: true,
                overall_match: false,
                error: NO_TEXT_MESSAGE,
                extracted_text: "",
            })
            .into_response());
        }
    };
    EventLogger::log_event(
        &request_id,
        VerificationEvent::OcrCompleted {
            provider,
            text_chars: text.chars().count(),
        },
    );

    let report = verify(&text, &form.fields.to_declared());
    let failed_fields: Vec<String> = report.failures().map(|c| c.field.to_string()).collect();
    info!(
        request_id = %request_id,
        overall_match = report.overall_match,
        failures = failed_fields.len(),
        "Label verified"
    );
    EventLogger::log_event(
        &request_id,
        VerificationEvent::Verified {
            overall_match: report.overall_match,
            failed_fields,
        },
    );

    Ok(Json(VerifyResponse {
        success: true,
        overall_match: report.overall_match,
        discrepancies: report.discrepancies,
        extracted_text: preview(&text, EXTRACTED_TEXT_PREVIEW_CHARS),
        form_input: form.fields,
    })
    .into_response())
}
