//! `labelcheck-core`: the label verification engine.
//!
//! Maps raw OCR text plus a set of user-declared label attributes to a
//! [`VerificationReport`]. Everything in this crate is synchronous, pure and
//! total: malformed declarations degrade to failing field checks, never errors.

pub mod checks;
pub mod engine;
pub mod normalize;
pub mod types;
pub mod units;

pub use checks::{
    abv_check, net_contents_check, net_contents_check_with, parse_declared_volume, render_abv,
    substring_check, DeclaredVolume, GOVERNMENT_WARNING,
};
pub use engine::verify;
pub use normalize::normalize;
pub use types::{DeclaredLabel, FieldCheck, FieldName, MatchStatus, VerificationReport};
pub use units::{unit_token, UnitSpec, UnitTable, UNIT_TABLE};
