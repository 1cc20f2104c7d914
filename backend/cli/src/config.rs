use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Service configuration. Read by the binary only; the verification engine
/// never sees it.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Google Cloud Vision API key
    pub google_vision_api_key: Option<String>,
    /// Override for the Vision `images:annotate` URL
    pub google_vision_endpoint: Option<String>,
    /// Staging directory for uploaded images
    pub upload_dir: PathBuf,
    /// Request body limit
    pub max_upload_bytes: usize,
    /// Enables the rolling JSON log file when set
    pub log_dir: Option<PathBuf>,
    /// Log level
    pub log_level: String,
    /// JSON console output instead of human-readable text
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            google_vision_api_key: None,
            google_vision_endpoint: None,
            upload_dir: std::env::temp_dir(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_dir: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            bind_address: get("LABELCHECK_BIND").unwrap_or(defaults.bind_address),
            port: get("LABELCHECK_PORT")
                .or_else(|| get("PORT"))
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            google_vision_api_key: get("GOOGLE_VISION_API_KEY"),
            google_vision_endpoint: get("GOOGLE_VISION_ENDPOINT"),
            upload_dir: get("LABELCHECK_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: get("LABELCHECK_MAX_UPLOAD_BYTES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            log_dir: get("LABELCHECK_LOG_DIR").map(PathBuf::from),
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
            log_json: get("LABELCHECK_LOG_FORMAT").is_some_and(|v| v.trim().eq_ignore_ascii_case("json")),
        }
    }

    /// Non-fatal problems worth logging at startup.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.google_vision_api_key.is_none() {
            warnings.push(
                "GOOGLE_VISION_API_KEY is not set; every OCR call will be rejected by the provider"
                    .to_string(),
            );
        }
        if self.max_upload_bytes == 0 {
            warnings.push("LABELCHECK_MAX_UPLOAD_BYTES is 0; all uploads will be refused".to_string());
        }
        warnings
    }
}
