//! Validation tests.

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn paths(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().map(|e| e.path.as_str()).collect()
}

#[test]
fn test_full_document() {
    let raw = json!({
        "version": "1.0",
        "timestamp": "2025-01-01T00:00:00.000Z",
        "modelInfo": [
            { "name": "bodice", "visible": true },
            { "name": "skirt", "visible": false }
        ],
        "shapeKeys": { "waist": 0.42, "bicepUp": 0.1 }
    });

    let config = validate_config(&raw).expect("should validate");
    assert_eq!(config.version.as_deref(), Some("1.0"));
    assert_eq!(
        config.timestamp.as_deref(),
        Some("2025-01-01T00:00:00.000Z")
    );
    assert_eq!(
        config.model_info,
        Some(vec![
            ModelInfo::new("bodice", true),
            ModelInfo::new("skirt", false)
        ])
    );
    assert_eq!(config.shape_keys.len(), 2);
    assert_eq!(config.shape_keys["bicepUp"], 0.1);
}

#[test]
fn test_minimal_document() {
    let config = validate_config(&json!({ "shapeKeys": {} })).unwrap();
    assert!(config.shape_keys.is_empty());
    assert!(config.version.is_none());
    assert!(config.model_info.is_none());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = validate_config(&json!({ "shapeKeys": {}, "camera": [1, 2, 3] })).unwrap();
    assert!(config.shape_keys.is_empty());
}

#[test]
fn test_missing_shape_keys() {
    let errors = validate_config(&json!({ "version": "1.0" })).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::MissingField);
    assert_eq!(errors[0].path, "shapeKeys");
}

#[test]
fn test_root_must_be_object() {
    for raw in [json!([]), json!(null), json!("config"), json!(3)] {
        let errors = validate_config(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ExpectedObject);
        assert!(errors[0].is_root());
    }
}

#[test]
fn test_collects_every_issue() {
    let raw = json!({
        "version": 2,
        "timestamp": "yesterday",
        "modelInfo": [
            { "name": "bodice" },
            { "name": 7, "visible": "yes" },
            "skirt"
        ],
        "shapeKeys": { "waist": "wide", "neck": 0.2, "hip": null }
    });

    let errors = validate_config(&raw).unwrap_err();
    let mut found = paths(&errors);
    found.sort();
    assert_eq!(
        found,
        vec![
            "modelInfo.0.visible",
            "modelInfo.1.name",
            "modelInfo.1.visible",
            "modelInfo.2",
            "shapeKeys.hip",
            "shapeKeys.waist",
            "timestamp",
            "version",
        ]
    );

    let by_path = |path: &str| errors.iter().find(|e| e.path == path).unwrap();
    assert_eq!(by_path("timestamp").code, ErrorCode::InvalidDatetime);
    assert_eq!(by_path("modelInfo.0.visible").code, ErrorCode::MissingField);
    assert_eq!(
        by_path("modelInfo.1.name").message,
        "expected string, received number"
    );
    assert_eq!(
        by_path("shapeKeys.waist").message,
        "expected number, received string"
    );
    assert_eq!(
        by_path("shapeKeys.hip").message,
        "expected number, received null"
    );
}

#[test]
fn test_shape_keys_must_be_object() {
    let errors = validate_config(&json!({ "shapeKeys": [0.1, 0.2] })).unwrap_err();
    assert_eq!(errors[0].code, ErrorCode::InvalidType);
    assert_eq!(errors[0].path, "shapeKeys");
}

#[test]
fn test_null_optional_fields_are_rejected() {
    let raw = json!({ "version": null, "modelInfo": null, "shapeKeys": {} });
    let errors = validate_config(&raw).unwrap_err();
    assert_eq!(paths(&errors), vec!["version", "modelInfo"]);
}

#[test]
fn test_timestamp_offsets_are_accepted() {
    let raw = json!({ "timestamp": "2025-06-30T12:15:00+02:00", "shapeKeys": {} });
    assert!(validate_config(&raw).is_ok());
}

#[test]
fn test_integer_values_are_numbers() {
    let config = validate_config(&json!({ "shapeKeys": { "waist": 1, "neck": -1 } })).unwrap();
    assert_eq!(config.shape_keys["waist"], 1.0);
    assert_eq!(config.shape_keys["neck"], -1.0);
}

#[test]
fn test_malformed_json() {
    let errors = validate_config_str("{ \"shapeKeys\": ").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::MalformedJson);
    assert!(errors[0].message.starts_with("invalid JSON"));
}

#[test]
fn test_exported_document_round_trips() {
    let mut shape_keys = BTreeMap::new();
    shape_keys.insert("waistUp".to_string(), 0.6);
    shape_keys.insert("waistDown".to_string(), 0.0);
    let config = PlaygroundConfig {
        version: Some("1.0".to_string()),
        timestamp: Some("2025-01-01T00:00:00.000Z".to_string()),
        model_info: Some(vec![ModelInfo::new("body", true)]),
        shape_keys,
    };

    let json = config.to_json_pretty().unwrap();
    assert_eq!(validate_config_str(&json).unwrap(), config);
}
