//! Validation traversal over real connectivity documents.
//!
//! The records declare no leaf constraints of their own, so the labeling and
//! aggregation tests layer an extra per-signature rule on top of the same
//! `validate_each` traversal the records use.

use tang_model::{
    validate_each, validate_format, CompositeError, ConnectivityResult, ErrorCode, FieldError,
    FormatRegistry, JsonModel, OperationKind, ServerResponse, SignatureBlock, StandardFormats,
    Validate, ValidationContext, ValidationError,
};

fn response(url: &str, sigs: Vec<Option<SignatureBlock>>) -> ServerResponse {
    ServerResponse::new()
        .with_tang_url(url)
        .with_payload("eyJrZXlzIjpbXX0")
        .with_signatures(sigs)
}

/// Rejects signature blocks whose signature is empty, and protected headers
/// that are not base64.
fn strict_signatures(
    result: &ConnectivityResult,
    formats: &dyn FormatRegistry,
) -> Result<(), CompositeError> {
    validate_each(
        ConnectivityResult::FIELD_SERVER_RESPONSES,
        result.server_responses.as_deref(),
        |r| {
            validate_each(ServerResponse::FIELD_SIGNATURES, r.signatures.as_deref(), |s| {
                s.validate(formats)?;
                if s.signature.as_deref().unwrap_or_default().is_empty() {
                    return Err(
                        FieldError::new("", ErrorCode::Required, "signature is empty").into(),
                    );
                }
                if let Some(protected) = &s.protected {
                    validate_format("protected", "byte", protected, formats)?;
                }
                Ok(())
            })
            .map_err(ValidationError::from)
        },
    )
}

#[test]
fn test_absent_server_responses_validate() {
    let formats = StandardFormats::new();
    let result = ConnectivityResult::new().with_succeeded(false);
    assert!(result.validate(&formats).is_ok());
    assert!(strict_signatures(&result, &formats).is_ok());
}

#[test]
fn test_null_element_in_middle_is_skipped() {
    let formats = StandardFormats::new();
    let result = ConnectivityResult::new().with_server_responses(vec![
        Some(response("http://tang1", vec![Some(SignatureBlock::new("cDE=", "s1"))])),
        None,
        Some(response("http://tang3", vec![None])),
    ]);

    assert!(result.validate(&formats).is_ok());
    assert!(strict_signatures(&result, &formats).is_ok());
}

#[test]
fn test_nested_failure_is_labeled_with_full_path() {
    let formats = StandardFormats::new();
    let good = || response("http://ok", vec![Some(SignatureBlock::new("cDE=", "s"))]);
    let result = ConnectivityResult::new().with_server_responses(vec![
        Some(good()),
        Some(good()),
        Some(response(
            "http://tang3",
            vec![Some(SignatureBlock::new("cDE=", ""))],
        )),
    ]);

    assert!(result.validate(&formats).is_ok());

    let err = ValidationError::from(strict_signatures(&result, &formats).unwrap_err());
    assert_eq!(err.paths(), vec!["tang_server_response.2.signatures.0"]);
    assert_eq!(err.leaves()[0].code, ErrorCode::Required);
}

#[test]
fn test_errors_from_every_failing_element_are_collected() {
    let formats = StandardFormats::new();
    let bad = || response("http://bad", vec![Some(SignatureBlock::new("***", "s"))]);
    let good = || response("http://ok", vec![Some(SignatureBlock::new("cDE=", "s"))]);
    let result = ConnectivityResult::new().with_server_responses(vec![
        Some(bad()),
        Some(good()),
        None,
        Some(bad()),
    ]);

    let err = ValidationError::from(strict_signatures(&result, &formats).unwrap_err());
    assert_eq!(
        err.paths(),
        vec![
            "tang_server_response.0.signatures.0.protected",
            "tang_server_response.3.signatures.0.protected",
        ]
    );
    assert!(err
        .leaves()
        .iter()
        .all(|e| e.code == ErrorCode::InvalidFormat));
}

#[test]
fn test_multiple_failures_inside_one_response() {
    let formats = StandardFormats::new();
    let result = ConnectivityResult::new().with_server_responses(vec![Some(response(
        "http://tang1",
        vec![
            Some(SignatureBlock::new("cDE=", "")),
            Some(SignatureBlock::new("cDE=", "s")),
            Some(SignatureBlock::new("%%", "s")),
        ],
    ))]);

    let err = ValidationError::from(strict_signatures(&result, &formats).unwrap_err());
    assert_eq!(
        err.paths(),
        vec![
            "tang_server_response.0.signatures.0",
            "tang_server_response.0.signatures.2.protected",
        ]
    );
}

#[test]
fn test_context_validation_matches_plain_validation() {
    let formats = StandardFormats::new();
    let ctx = ValidationContext::new(OperationKind::Response)
        .with_operation("v2GetClusterTangConnectivity");
    let doc = br#"{"is_success": true, "tang_server_response": [null, {"signatures": [null, {}]}]}"#;
    let result = ConnectivityResult::from_json_bytes(doc).unwrap();

    assert_eq!(
        result.validate(&formats),
        result.context_validate(&ctx, &formats)
    );
    assert!(result.context_validate(&ctx, &formats).is_ok());
}

#[test]
fn test_empty_registry_is_enough_for_this_model() {
    let formats = StandardFormats::empty();
    let doc = br#"{"tang_server_response": [{"tang_url": "not a url", "signatures": []}]}"#;
    let result = ConnectivityResult::from_json_bytes(doc).unwrap();
    assert!(result.validate(&formats).is_ok());
}
