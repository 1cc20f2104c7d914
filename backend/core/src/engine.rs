//! Aggregation of the field checks into a [`VerificationReport`].

use crate::checks::{abv_check, net_contents_check, render_abv, substring_check, GOVERNMENT_WARNING};
use crate::normalize::normalize;
use crate::types::{DeclaredLabel, FieldCheck, FieldName, VerificationReport};

/// Verify a declared label against the raw text recognized on its image.
///
/// Total over all inputs: empty, zero or unparseable declarations become
/// failing rows rather than errors. Rows follow [`FieldName::ALL`].
pub fn verify(extracted_text: &str, declared: &DeclaredLabel) -> VerificationReport {
    let haystack = normalize(extracted_text);

    let (net_status, net_mandatory) = net_contents_check(&declared.net_contents, &haystack);

    let checks = vec![
        FieldCheck {
            field: FieldName::BrandName,
            status: substring_check(&declared.brand_name, &haystack),
            expected: declared.brand_name.trim().to_string(),
            mandatory: true,
        },
        FieldCheck {
            field: FieldName::ProductClass,
            status: substring_check(&declared.product_class, &haystack),
            expected: declared.product_class.trim().to_string(),
            mandatory: true,
        },
        FieldCheck {
            field: FieldName::AlcoholContent,
            status: abv_check(declared.alcohol_content, extracted_text),
            expected: format!("{}% ABV", render_abv(declared.alcohol_content)),
            mandatory: true,
        },
        FieldCheck {
            field: FieldName::NetContents,
            status: net_status,
            expected: if net_mandatory {
                declared.net_contents.trim().to_string()
            } else {
                "(optional) not declared".to_string()
            },
            mandatory: net_mandatory,
        },
        FieldCheck {
            field: FieldName::GovernmentWarning,
            status: substring_check(GOVERNMENT_WARNING, &haystack),
            expected: GOVERNMENT_WARNING.to_uppercase(),
            mandatory: true,
        },
    ];

    VerificationReport::from_checks(checks)
}
