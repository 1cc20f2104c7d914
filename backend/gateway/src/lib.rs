//! Label Verification HTTP API
//!
//! `POST /api/verify` takes a label image plus the declared attributes, runs
//! the image through the configured OCR provider, and reports which
//! declarations the recognized text supports.

pub mod attachments;
pub mod error;
pub mod health_api;
pub mod server;
pub mod verify_api;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
