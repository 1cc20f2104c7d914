//! Unit-synonym table for net-contents matching.
//!
//! Each entry maps a canonical unit token to the surface spellings accepted in
//! OCR text. Spellings are regex fragments built only from literal letters and
//! `\s*`; nothing from the request is ever spliced in unescaped.

use regex::Regex;

use crate::normalize::normalize;

/// One unit: its canonical token, long-form aliases that resolve to it, and
/// the spellings searched for in label text.
#[derive(Debug, Clone, Copy)]
pub struct UnitSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub spellings: &'static [&'static str],
}

impl UnitSpec {
    fn answers_to(&self, token: &str) -> bool {
        self.canonical == token || self.aliases.contains(&token)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UnitTable {
    units: &'static [UnitSpec],
}

pub static UNIT_TABLE: UnitTable = UnitTable {
    units: &[
        UnitSpec {
            canonical: "ml",
            aliases: &["milliliter", "milliliters", "millilitre", "millilitres", "mls"],
            spellings: &[r"m\s*l", "ml", "milliliters?", "millilitres?"],
        },
        UnitSpec {
            canonical: "floz",
            aliases: &["fluidounce", "fluidounces", "fluidoz", "flounce", "flounces"],
            spellings: &[r"fl\s*oz", "floz", r"fluid\s*ounces?"],
        },
        UnitSpec {
            canonical: "l",
            aliases: &["liter", "liters", "litre", "litres", "ltr"],
            spellings: &["l", "liters?", "litres?"],
        },
        UnitSpec {
            canonical: "cl",
            aliases: &["centiliter", "centiliters", "centilitre", "centilitres"],
            spellings: &[r"c\s*l", "centiliters?", "centilitres?"],
        },
        UnitSpec {
            canonical: "oz",
            aliases: &["ounce", "ounces"],
            spellings: &["oz", "ounces?"],
        },
        UnitSpec {
            canonical: "gal",
            aliases: &["gallon", "gallons"],
            spellings: &["gal", "gallons?"],
        },
    ],
};

/// Reduce a unit as typed ("fl. oz.", "mL") to its lookup key ("floz", "ml").
pub fn unit_token(raw: &str) -> String {
    normalize(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

impl UnitTable {
    pub const fn new(units: &'static [UnitSpec]) -> Self {
        Self { units }
    }

    /// Look up a canonical token or alias.
    pub fn resolve(&self, token: &str) -> Option<&'static UnitSpec> {
        self.units.iter().find(|u| u.answers_to(token))
    }

    /// Regex alternation of accepted spellings for `token`.
    ///
    /// Tokens missing from the table match only their own literal spelling,
    /// and only if they are purely alphabetic.
    pub fn alternation(&self, token: &str) -> Option<String> {
        if let Some(unit) = self.resolve(token) {
            return Some(unit.spellings.join("|"));
        }
        if !token.is_empty() && token.chars().all(|c| c.is_alphabetic()) {
            return Some(regex::escape(token));
        }
        None
    }

    /// Case-insensitive matcher for `volume` followed by any spelling of
    /// `token`, anchored on word boundaries. `volume` must be plain digits.
    pub fn volume_matcher(&self, volume: &str, token: &str) -> Option<Regex> {
        if volume.is_empty() || !volume.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let units = self.alternation(token)?;
        Regex::new(&format!(r"(?i)\b{volume}\s*(?:{units})\b")).ok()
    }
}
