//! The individual field checks.
//!
//! Substring-style checks take an already-normalized haystack; the ABV check
//! works on raw OCR text because it needs the `%` sign.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;
use crate::types::MatchStatus;
use crate::units::{unit_token, UnitTable, UNIT_TABLE};

/// Phrase every compliant label must carry.
pub const GOVERNMENT_WARNING: &str = "government warning";

/// `(number)(optional space)(letters)` on the declared net contents. The number
/// may carry thousands separators, which normalization removes again.
static DECLARED_VOLUME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*([A-Za-z][A-Za-z.]*(?:\s+[A-Za-z][A-Za-z.]*)*)").unwrap()
});

static FIRST_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Contiguous-substring match of a declared value against normalized text.
///
/// An empty declaration never matches.
pub fn substring_check(declared: &str, normalized_haystack: &str) -> MatchStatus {
    let needle = normalize(declared);
    if !needle.is_empty() && normalized_haystack.contains(&needle) {
        MatchStatus::Match
    } else {
        MatchStatus::NotFoundOrMismatch
    }
}

/// Renders an ABV claim the way it is searched for: `45.0` becomes `"45"`.
pub fn render_abv(abv: f64) -> String {
    format!("{abv}")
}

/// Looks for `"<abv>%"` (optionally `.0`, spacing, and an `alc.`/`vol.`/`by vol.`
/// suffix) in raw OCR text.
///
/// Zero, negative and non-finite claims never match.
pub fn abv_check(declared_abv: f64, raw_text: &str) -> MatchStatus {
    if !declared_abv.is_finite() || declared_abv <= 0.0 {
        return MatchStatus::NotFoundOrMismatch;
    }
    let number = regex::escape(&render_abv(declared_abv));
    let pattern = format!(
        r"(?i)\b{number}(?:\.0)?\s*%(?:\s*(?:alc\.?|vol\.?|by\s+vol\.?))?|\b{number}%"
    );
    match Regex::new(&pattern) {
        Ok(re) if re.is_match(raw_text) => MatchStatus::Match,
        _ => MatchStatus::NotFoundOrMismatch,
    }
}

/// A declared net contents split into volume and unit token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredVolume {
    /// Digits only, in the same normalized form the haystack uses.
    pub volume: String,
    /// Lookup key into the unit table.
    pub unit: String,
}

/// Structured parse of e.g. `"750 mL"` or `"12 fl. oz."`.
///
/// When the trailing words do not all name one unit, the longest leading run
/// of words that does is used, falling back to the first word.
pub fn parse_declared_volume(declared: &str, table: &UnitTable) -> Option<DeclaredVolume> {
    let caps = DECLARED_VOLUME_RE.captures(declared)?;
    let volume = normalize(&caps[1]);
    let words: Vec<&str> = caps[2].split_whitespace().collect();

    let unit = (1..=words.len())
        .rev()
        .map(|n| unit_token(&words[..n].join(" ")))
        .find(|token| table.resolve(token).is_some())
        .unwrap_or_else(|| unit_token(words[0]));

    if unit.is_empty() {
        return None;
    }
    Some(DeclaredVolume { volume, unit })
}

/// Net contents check using the built-in unit table.
///
/// Returns the status and whether the check is mandatory (something was
/// declared). A non-mandatory result never affects the overall verdict.
pub fn net_contents_check(declared: &str, normalized_haystack: &str) -> (MatchStatus, bool) {
    net_contents_check_with(&UNIT_TABLE, declared, normalized_haystack)
}

pub fn net_contents_check_with(
    table: &UnitTable,
    declared: &str,
    normalized_haystack: &str,
) -> (MatchStatus, bool) {
    let normalized_declared = normalize(declared);
    if normalized_declared.is_empty() {
        return (MatchStatus::NotFoundOrMismatch, false);
    }

    if let Some(parsed) = parse_declared_volume(declared, table) {
        let found = table
            .volume_matcher(&parsed.volume, &parsed.unit)
            .is_some_and(|re| re.is_match(normalized_haystack));
        let status = if found {
            MatchStatus::Match
        } else {
            MatchStatus::NotFoundOrMismatch
        };
        return (status, true);
    }

    // No unit could be split off: only the bare number can be compared.
    let status = match FIRST_NUMBER_RE.find(&normalized_declared) {
        Some(number) if normalized_haystack.contains(number.as_str()) => {
            MatchStatus::MismatchUnitMissing
        }
        _ => MatchStatus::NotFoundOrMismatch,
    };
    (status, true)
}
