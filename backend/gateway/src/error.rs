//! Error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use logging::redact_sensitive_data;

pub const MISSING_IMAGE_MESSAGE: &str = "No image file uploaded.";
pub const INVALID_UPLOAD_MESSAGE: &str = "Invalid upload.";
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing the label image.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no image file uploaded")]
    MissingImage,

    /// The multipart body could not be read.
    #[error("invalid upload: {0}")]
    Upload(String),

    /// OCR provider, transport or storage failure.
    #[error("processing failed: {0:#}")]
    Processing(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingImage => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": MISSING_IMAGE_MESSAGE })),
            )
                .into_response(),
            ApiError::Upload(details) => {
                warn!(details = %details, "Rejected malformed upload");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "message": INVALID_UPLOAD_MESSAGE,
                        "details": details,
                    })),
                )
                    .into_response()
            }
            ApiError::Processing(err) => {
                let details = redact_sensitive_data(&format!("{err:#}"));
                error!(error = %details, "Label processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "message": PROCESSING_ERROR_MESSAGE,
                        "details": details,
                    })),
                )
                    .into_response()
            }
        }
    }
}
