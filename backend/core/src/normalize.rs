//! Text normalization shared by every substring-style check.

use once_cell::sync::Lazy;
use regex::Regex;

/// Punctuation removed before comparison. `%` is part of the set, which is why
/// the ABV check runs over raw text instead.
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,/#!$%\^&*;:{}=\-_`~()]").unwrap());

static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Lower-case, strip punctuation, collapse whitespace runs, trim.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION_RE.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUN_RE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
