//! Optical Character Recognition (OCR)
//!
//! The verification service only needs one block of text per image; layout and
//! bounding boxes are discarded by the providers.

use anyhow::Result;
use async_trait::async_trait;

/// What a provider recognized on an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    Text(String),
    /// The provider answered but found nothing legible.
    NoDetections,
}

impl OcrOutcome {
    /// Blank text is reported as [`OcrOutcome::NoDetections`].
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::NoDetections
        } else {
            Self::Text(text)
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::NoDetections => None,
        }
    }
}

/// An external text recognizer. Constructed once at startup and shared.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider name for logs (e.g. "google-vision").
    fn name(&self) -> &str;

    /// Recognize all text in an encoded image.
    async fn detect_text(&self, image: &[u8]) -> Result<OcrOutcome>;
}
