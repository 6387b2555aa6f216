//! Integration tests for mandate-guidelines.

use std::io::Write;
use std::time::Duration;

use mandate_guidelines::prelude::*;
use tokio_util::sync::CancellationToken;

// =============================================================================
// RULES LIBRARY
// =============================================================================

const EXTRACTION: &str = r#"{
    "extracted_rules": [
        {"rule_id": "R101", "category": "Duration", "description": "Portfolio duration must stay within 1 year of benchmark", "threshold": 1, "threshold_unit": "number", "severity": "soft_breach"},
        {"rule_id": "R102", "category": "Credit", "description": "No holdings rated below BBB-", "threshold": 0, "threshold_unit": "count", "severity": "hard_breach"},
        {"rule_id": "R103", "category": "Liquidity", "description": "Maintain adequate liquidity"}
    ],
    "ambiguous_rules": [{"text": "Maintain adequate liquidity", "reason": "no threshold"}],
    "total_rules_extracted": 3,
    "confidence_score": 0.72
}"#;

#[test]
fn test_library_from_extraction_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXTRACTION.as_bytes()).unwrap();

    let library = RulesLibrary::from_path(file.path()).unwrap();
    assert_eq!(library.len(), 3);
    assert_eq!(library.ambiguous().len(), 1);

    let rows: Vec<RuleRow> = library.filter("").into_iter().map(RuleRow::from_rule).collect();
    assert_eq!(rows[0].threshold, "1.00");
    assert_eq!(rows[1].severity.label, "Hard Breach");
    assert_eq!(rows[2].threshold, "N/A");
    assert_eq!(rows[2].severity.label, "Unrecognized");
}

#[test]
fn test_invalid_extraction_document() {
    let err = RulesLibrary::from_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, GuidelineError::Json(_)));
}

#[test]
fn test_export_filtered_rules() {
    let library = RulesLibrary::sample();
    let visible = library.filter("breach");
    assert!(visible.is_empty());

    let visible = library.filter("exceed");
    let csv = rules_csv_string(visible).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        RULES_HEADER.to_vec()
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "R002");
    assert_eq!(&rows[0][3], "1.5");
    assert_eq!(&rows[1][0], "R005");
    assert_eq!(&rows[1][4], "soft_breach");
    assert_eq!(RULES_EXPORT_FILENAME, "rules_library.csv");
}

// =============================================================================
// VERSION COMPARISON
// =============================================================================

#[tokio::test]
async fn test_compare_any_pair_gives_same_diff() {
    let cancel = CancellationToken::new();
    let mut first = None;

    for (a, b) in [(0, 1), (3, 0), (1, 2)] {
        let mut cmp = VersionComparison::with_delay(Duration::ZERO);
        cmp.select_a(GUIDELINE_VERSIONS[a]).unwrap();
        cmp.select_b(GUIDELINE_VERSIONS[b]).unwrap();
        let diff = cmp.compare(&cancel).await.unwrap();

        assert_eq!(diff.added.len(), 2);
        assert_eq!(diff.removed, vec!["Legacy benchmark reference removed"]);
        match &first {
            None => first = Some(diff),
            Some(expected) => assert_eq!(&diff, expected),
        }
    }
}

#[tokio::test]
async fn test_cancel_during_delay() {
    let mut cmp = VersionComparison::with_delay(Duration::from_secs(30));
    cmp.select_a(GUIDELINE_VERSIONS[0]).unwrap();
    cmp.select_b(GUIDELINE_VERSIONS[1]).unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(Duration::from_secs(5), cmp.compare(&cancel)).await;
    assert_eq!(result.unwrap(), Err(GuidelineError::Cancelled));
    assert_eq!(cmp.state(), ComparisonState::Idle);

    // Still usable afterwards
    let mut quick = VersionComparison::with_delay(Duration::ZERO);
    quick.select_a(GUIDELINE_VERSIONS[2]).unwrap();
    quick.select_b(GUIDELINE_VERSIONS[3]).unwrap();
    assert!(quick.compare(&CancellationToken::new()).await.is_ok());
}
