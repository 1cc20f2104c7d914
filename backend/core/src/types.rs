use std::fmt;

use serde::{Deserialize, Serialize};

/// What the submitter claims is printed on the label.
///
/// Every field is untrusted and may be empty; `alcohol_content` defaults to 0,
/// which never matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeclaredLabel {
    pub brand_name: String,
    pub product_class: String,
    /// Percent alcohol by volume.
    pub alcohol_content: f64,
    /// Free-form volume and unit, e.g. "750 mL".
    pub net_contents: String,
}

/// The label attribute a [`FieldCheck`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "Brand Name")]
    BrandName,
    #[serde(rename = "Product Class")]
    ProductClass,
    #[serde(rename = "Alcohol Content")]
    AlcoholContent,
    #[serde(rename = "Net Contents")]
    NetContents,
    #[serde(rename = "Government Warning")]
    GovernmentWarning,
}

impl FieldName {
    /// Report order. Never reordered.
    pub const ALL: [FieldName; 5] = [
        FieldName::BrandName,
        FieldName::ProductClass,
        FieldName::AlcoholContent,
        FieldName::NetContents,
        FieldName::GovernmentWarning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::BrandName => "Brand Name",
            FieldName::ProductClass => "Product Class",
            FieldName::AlcoholContent => "Alcohol Content",
            FieldName::NetContents => "Net Contents",
            FieldName::GovernmentWarning => "Government Warning",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "Match")]
    Match,
    #[serde(rename = "Not Found or Mismatch")]
    NotFoundOrMismatch,
    /// The declared volume was found but no unit was declared alongside it.
    #[serde(rename = "Mismatch (Unit Missing)")]
    MismatchUnitMissing,
}

impl MatchStatus {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchStatus::Match)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Match => "Match",
            MatchStatus::NotFoundOrMismatch => "Not Found or Mismatch",
            MatchStatus::MismatchUnitMissing => "Mismatch (Unit Missing)",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCheck {
    pub field: FieldName,
    pub status: MatchStatus,
    /// Human-readable rendering of what was looked for.
    pub expected: String,
    /// Optional rows are reported but never fail the verdict.
    pub mandatory: bool,
}

impl FieldCheck {
    /// Whether this row forces the overall verdict to fail.
    pub fn is_failure(&self) -> bool {
        self.mandatory && !self.status.is_match()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub overall_match: bool,
    /// One row per [`FieldName::ALL`], in that order.
    pub discrepancies: Vec<FieldCheck>,
}

impl VerificationReport {
    /// Builds a report, deriving the verdict from the rows.
    pub fn from_checks(discrepancies: Vec<FieldCheck>) -> Self {
        let overall_match = discrepancies.iter().all(|c| !c.is_failure());
        Self {
            overall_match,
            discrepancies,
        }
    }

    pub fn check(&self, field: FieldName) -> Option<&FieldCheck> {
        self.discrepancies.iter().find(|c| c.field == field)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.discrepancies.iter().filter(|c| c.is_failure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(field: FieldName, status: MatchStatus, mandatory: bool) -> FieldCheck {
        FieldCheck {
            field,
            status,
            expected: String::new(),
            mandatory,
        }
    }

    #[test]
    fn optional_failure_does_not_fail_report() {
        let report = VerificationReport::from_checks(vec![
            row(FieldName::BrandName, MatchStatus::Match, true),
            row(FieldName::NetContents, MatchStatus::NotFoundOrMismatch, false),
        ]);
        assert!(report.overall_match);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn unit_missing_is_a_failure() {
        let report = VerificationReport::from_checks(vec![row(
            FieldName::NetContents,
            MatchStatus::MismatchUnitMissing,
            true,
        )]);
        assert!(!report.overall_match);
    }

    #[test]
    fn serializes_with_display_names() {
        let json = serde_json::to_value(row(
            FieldName::GovernmentWarning,
            MatchStatus::MismatchUnitMissing,
            true,
        ))
        .unwrap();
        assert_eq!(json["field"], "Government Warning");
        assert_eq!(json["status"], "Mismatch (Unit Missing)");
    }

    #[test]
    fn declared_label_accepts_partial_camel_case() {
        let label: DeclaredLabel =
            serde_json::from_str(r#"{"brandName":"Old Tom","alcoholContent":45}"#).unwrap();
        assert_eq!(label.brand_name, "Old Tom");
        assert_eq!(label.alcohol_content, 45.0);
        assert!(label.net_contents.is_empty());
    }
}
