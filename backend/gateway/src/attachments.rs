//! Label image upload handling.
//!
//! The uploaded image lives in a named temporary file for exactly as long as
//! its [`LabelUpload`] does; dropping it removes the file on every exit path.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use axum::extract::Multipart;
use regex::Regex;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use labelcheck_core::DeclaredLabel;

use crate::error::ApiError;

/// Leading decimal number of a free-text field, so `45%` and `45 % ABV` read as 45.
static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+))").unwrap());

/// Parse the number an ABV field starts with; anything else is 0.
pub fn parse_abv(raw: &str) -> f64 {
    LEADING_NUMBER_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0.0)
}

/// The declared fields exactly as submitted, echoed back in responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub brand_name: String,
    pub product_class: String,
    pub alcohol_content: String,
    pub net_contents: String,
}

impl FormInput {
    /// An `alcoholContent` without a leading number becomes 0, which never matches.
    pub fn to_declared(&self) -> DeclaredLabel {
        DeclaredLabel {
            brand_name: self.brand_name.clone(),
            product_class: self.product_class.clone(),
            alcohol_content: parse_abv(&self.alcohol_content),
            net_contents: self.net_contents.clone(),
        }
    }

    fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "brandName" => &mut self.brand_name,
            "productClass" => &mut self.product_class,
            "alcoholContent" => &mut self.alcohol_content,
            "netContents" => &mut self.net_contents,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// A transiently stored label image.
#[derive(Debug)]
pub struct LabelUpload {
    file: NamedTempFile,
    pub original_name: String,
    pub content_type: Option<String>,
    pub size_bytes: usize,
}

impl LabelUpload {
    /// Write `data` to a fresh temp file under `dir`.
    pub async fn store(
        dir: &Path,
        original_name: &str,
        content_type: Option<String>,
        data: &[u8],
    ) -> anyhow::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("label-");
        let suffix = safe_extension(original_name).map(|ext| format!(".{ext}"));
        if let Some(suffix) = &suffix {
            builder.suffix(suffix);
        }
        let file = builder
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create upload file in {}", dir.display()))?;
        tokio::fs::write(file.path(), data)
            .await
            .context("Failed to store uploaded image")?;
        debug!(path = %file.path().display(), size = data.len(), "Stored label upload");

        Ok(Self {
            file,
            original_name: original_name.to_string(),
            content_type,
            size_bytes: data.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the stored image back for the OCR provider.
    pub async fn read(&self) -> anyhow::Result<Vec<u8>> {
        tokio::fs::read(self.path())
            .await
            .context("Failed to read stored upload")
    }
}

/// Alphanumeric extensions only; anything else is dropped.
fn safe_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    (!ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .then(|| ext.to_ascii_lowercase())
}

/// Parsed `POST /api/verify` body.
#[derive(Debug, Default)]
pub struct VerifyForm {
    pub image: Option<LabelUpload>,
    pub fields: FormInput,
}

/// Drain a multipart body, storing the first non-empty file part under
/// `upload_dir` and collecting the known text fields.
pub async fn read_verify_form(
    mut multipart: Multipart,
    upload_dir: &Path,
) -> Result<VerifyForm, ApiError> {
    let mut form = VerifyForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Upload(e.body_text()))?;
            if form.image.is_some() || data.is_empty() {
                debug!(field = %name, "Ignoring extra or empty file part");
                continue;
            }
            debug!(field = %name, file = %file_name, size = data.len(), "Received label image");
            form.image = Some(LabelUpload::store(upload_dir, &file_name, content_type, &data).await?);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::Upload(e.body_text()))?;
        if !form.fields.set(&name, value) {
            debug!(field = %name, "Ignoring unknown form field");
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_abv_defaults_to_zero() {
        let input = FormInput {
            alcohol_content: "forty".into(),
            ..FormInput::default()
        };
        assert_eq!(input.to_declared().alcohol_content, 0.0);

        let input = FormInput {
            alcohol_content: " 45.0 ".into(),
            ..FormInput::default()
        };
        assert_eq!(input.to_declared().alcohol_content, 45.0);
    }

    #[test]
    fn abv_reads_leading_number_of_free_text() {
        assert_eq!(parse_abv("45%"), 45.0);
        assert_eq!(parse_abv("45 % ABV"), 45.0);
        assert_eq!(parse_abv("12.5% alc/vol"), 12.5);
        assert_eq!(parse_abv(".5"), 0.5);
        assert_eq!(parse_abv("ABV 45"), 0.0);
        assert_eq!(parse_abv(""), 0.0);
    }

    #[test]
    fn only_known_fields_are_collected() {
        let mut input = FormInput::default();
        assert!(input.set("netContents", "750 mL".into()));
        assert!(!input.set("proof", "90".into()));
        assert_eq!(input.net_contents, "750 mL");
    }

    #[test]
    fn extension_is_sanitized() {
        assert_eq!(safe_extension("label.PNG").as_deref(), Some("png"));
        assert_eq!(safe_extension("label.j$pg"), None);
        assert_eq!(safe_extension("label"), None);
    }

    #[tokio::test]
    async fn upload_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let upload = LabelUpload::store(dir.path(), "label.jpg", None, b"\xff\xd8\xff")
            .await
            .unwrap();
        let path = upload.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(upload.read().await.unwrap(), b"\xff\xd8\xff");
        drop(upload);
        assert!(!path.exists());
    }
}
