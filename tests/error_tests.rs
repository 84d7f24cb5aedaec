//! Error handling tests

use invoice_extract::error::ExtractError;

#[test]
fn test_structural_error_names_element() {
    let err = ExtractError::Structural {
        element: "Status".to_string(),
        reason: "anchor cell not found".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Structural error: 'Status' anchor cell not found"
    );
    assert!(err.is_structural());
}

#[test]
fn test_missing_mandatory_field_message() {
    let err = ExtractError::MissingMandatoryField("Cust No'".to_string());
    assert!(err.to_string().contains("'Cust No''"));
    assert!(err.is_structural());
}

#[test]
fn test_broken_layout_message() {
    let err = ExtractError::BrokenTableLayout {
        status_row: 5,
        invoice_row: 7,
    };
    assert_eq!(
        err.to_string(),
        "Broken table layout: 'Status' is on row 5 but 'Invoice #' is on row 7"
    );
}

#[test]
fn test_period_mismatch_message() {
    let err = ExtractError::PeriodMismatch {
        expected: "2023-10".to_string(),
        found: "2023-09".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invoicing period mismatch: expected 2023-10, sheet declares 2023-09"
    );
    assert!(err.is_structural());
}

#[test]
fn test_out_of_range_is_structural() {
    assert!(ExtractError::OutOfRange("no column to the right of 'Z'".to_string()).is_structural());
    assert!(ExtractError::InvalidPeriod("x".to_string()).is_structural());
}

#[test]
fn test_io_errors_are_not_structural() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: ExtractError = io.into();
    assert!(matches!(err, ExtractError::Io(_)));
    assert!(err.to_string().starts_with("IO error:"));
    assert!(!err.is_structural());

    assert!(!ExtractError::Decode("bad zip".to_string()).is_structural());
    assert!(!ExtractError::Template("x".to_string()).is_structural());
}

#[test]
fn test_yaml_error_conversion() {
    let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
    let err: ExtractError = yaml_err.into();
    assert!(err.to_string().starts_with("YAML error:"));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: ExtractError = json_err.into();
    assert!(err.to_string().starts_with("JSON error:"));
}
