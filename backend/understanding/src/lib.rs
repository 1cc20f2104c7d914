pub mod ocr;
pub mod vision;

pub use ocr::{OcrOutcome, OcrProvider};
pub use vision::GoogleVisionOcr;
