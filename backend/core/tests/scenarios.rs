use labelcheck_core::{normalize, verify, DeclaredLabel, FieldName, MatchStatus, VerificationReport};

const LABEL_TEXT: &str = "OLD TOM DISTILLERY\n\
KENTUCKY STRAIGHT BOURBON WHISKEY\n\
45% Alc./Vol. (90 Proof)\n\
NET CONTENTS: 750 ML\n\
GOVERNMENT WARNING: (1) ACCORDING TO THE SURGEON GENERAL, WOMEN SHOULD NOT DRINK \
ALCOHOLIC BEVERAGES DURING PREGNANCY BECAUSE OF THE RISK OF BIRTH DEFECTS.";

fn declared() -> DeclaredLabel {
    DeclaredLabel {
        brand_name: "Old Tom Distillery".into(),
        product_class: "Kentucky Straight Bourbon Whiskey".into(),
        alcohol_content: 45.0,
        net_contents: "750 mL".into(),
    }
}

fn status(report: &VerificationReport, field: FieldName) -> MatchStatus {
    report.check(field).map(|c| c.status).unwrap()
}

fn assert_verdict_consistent(report: &VerificationReport) {
    let all_mandatory_pass = report
        .discrepancies
        .iter()
        .filter(|c| c.mandatory)
        .all(|c| c.status == MatchStatus::Match);
    assert_eq!(report.overall_match, all_mandatory_pass);
}

#[test]
fn full_success() {
    let report = verify(LABEL_TEXT, &declared());
    assert!(report.overall_match);
    assert_eq!(report.discrepancies.len(), 5);
    assert!(report.discrepancies.iter().all(|c| c.status == MatchStatus::Match));
}

#[test]
fn brand_mismatch() {
    let label = DeclaredLabel {
        brand_name: "Old SAM Distillery".into(),
        ..declared()
    };
    let report = verify(LABEL_TEXT, &label);
    assert_eq!(status(&report, FieldName::BrandName), MatchStatus::NotFoundOrMismatch);
    assert!(!report.overall_match);
}

#[test]
fn decimal_abv_rendering_still_matches() {
    let label = DeclaredLabel {
        alcohol_content: 45.0,
        ..declared()
    };
    let report = verify(LABEL_TEXT, &label);
    assert_eq!(status(&report, FieldName::AlcoholContent), MatchStatus::Match);

    let report = verify(&LABEL_TEXT.replace("45%", "45.0%"), &declared());
    assert_eq!(status(&report, FieldName::AlcoholContent), MatchStatus::Match);
}

#[test]
fn net_contents_without_unit() {
    let label = DeclaredLabel {
        net_contents: "750".into(),
        ..declared()
    };
    let report = verify(LABEL_TEXT, &label);
    assert_eq!(status(&report, FieldName::NetContents), MatchStatus::MismatchUnitMissing);
    assert!(!report.overall_match);
}

#[test]
fn blank_net_contents_is_optional() {
    let label = DeclaredLabel {
        net_contents: String::new(),
        ..declared()
    };
    let report = verify(LABEL_TEXT, &label);
    let net = report.check(FieldName::NetContents).unwrap();
    assert!(!net.mandatory);
    assert!(report.overall_match);
}

#[test]
fn zero_abv_always_fails() {
    let label = DeclaredLabel {
        alcohol_content: 0.0,
        ..declared()
    };
    let report = verify("0% ALC/VOL", &label);
    assert_eq!(status(&report, FieldName::AlcoholContent), MatchStatus::NotFoundOrMismatch);
    assert!(!report.overall_match);
}

#[test]
fn case_and_punctuation_noise_is_ignored() {
    let noisy = "old.tom.  distillery\nkentucky-straight bourbon whiskey; 45 % ALC. BY VOL.\n750ml\ngovernment   warning";
    let label = DeclaredLabel {
        brand_name: "OLD TOM DISTILLERY".into(),
        product_class: "kentucky straight bourbon whiskey".into(),
        ..declared()
    };
    let report = verify(noisy, &label);
    assert_eq!(status(&report, FieldName::AlcoholContent), MatchStatus::Match);
    assert_eq!(status(&report, FieldName::NetContents), MatchStatus::Match);
    assert_eq!(status(&report, FieldName::GovernmentWarning), MatchStatus::Match);
    assert_eq!(status(&report, FieldName::BrandName), MatchStatus::NotFoundOrMismatch);
    assert_verdict_consistent(&report);
}

#[test]
fn malformed_declarations_never_panic() {
    let values = ["", " ", "750", "mL", "750 mL", "((*))", "1.2.3 fl. oz.", "9999999999999999999999 gal", "ß µl"];
    let abvs = [0.0, -1.0, 45.0, 12.5, f64::NAN, f64::INFINITY, f64::MAX];
    for text in [LABEL_TEXT, "", "%%%"] {
        for value in values {
            for abv in abvs {
                let label = DeclaredLabel {
                    brand_name: value.into(),
                    product_class: value.into(),
                    alcohol_content: abv,
                    net_contents: value.into(),
                };
                let report = verify(text, &label);
                assert_eq!(report.discrepancies.len(), 5);
                assert_verdict_consistent(&report);
            }
        }
    }
}

#[test]
fn normalize_is_idempotent_over_label_text() {
    let once = normalize(LABEL_TEXT);
    assert_eq!(normalize(&once), once);
}
