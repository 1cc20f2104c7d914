/// Google Cloud Vision `TEXT_DETECTION` over the REST `images:annotate` API.
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ocr::{OcrOutcome, OcrProvider};

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

pub struct GoogleVisionOcr {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GoogleVisionOcr {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: [ImageRequest<'a>; 1],
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    image: ImageContent<'a>,
    features: [Feature; 1],
}

#[derive(Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageResponse {
    text_annotations: Vec<TextAnnotation>,
    full_text_annotation: Option<TextAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    #[serde(default, alias = "text")]
    description: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    message: String,
}

/// The first text annotation is the whole-image block; individual words follow.
fn outcome_from_response(response: AnnotateResponse) -> Result<OcrOutcome> {
    let Some(image) = response.responses.into_iter().next() else {
        return Ok(OcrOutcome::NoDetections);
    };
    if let Some(status) = image.error {
        bail!("Google Vision error: {}", status.message);
    }
    let text = image
        .text_annotations
        .into_iter()
        .next()
        .or(image.full_text_annotation)
        .map(|a| a.description)
        .unwrap_or_default();
    Ok(OcrOutcome::from_text(text))
}

#[async_trait]
impl OcrProvider for GoogleVisionOcr {
    fn name(&self) -> &str {
        "google-vision"
    }

    async fn detect_text(&self, image: &[u8]) -> Result<OcrOutcome> {
        info!("[OCR] Detecting text via Google Vision ({} bytes)", image.len());
        let b64 = STANDARD.encode(image);
        let body = AnnotateRequest {
            requests: [ImageRequest {
                image: ImageContent { content: &b64 },
                features: [Feature { kind: "TEXT_DETECTION" }],
            }],
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .context("Google Vision request failed")?;
        if !resp.status().is_success() {
            let status = resp.status();
            bail!(
                "Google Vision returned {}: {}",
                status,
                resp.text().await.unwrap_or_default()
            );
        }
        let parsed: AnnotateResponse = resp
            .json()
            .await
            .context("Google Vision returned an unreadable body")?;
        let outcome = outcome_from_response(parsed)?;
        debug!(detected = outcome.text().is_some(), "[OCR] Google Vision finished");
        Ok(outcome)
    }
}
