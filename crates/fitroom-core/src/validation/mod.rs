//! Playground config validation.
//!
//! Imported documents are checked field by field against the config schema
//! and every issue is collected before anything is returned, so a caller can
//! show the full list at once. A document either produces a complete
//! [`PlaygroundConfig`] or a list of issues; never both.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::config::{ModelInfo, PlaygroundConfig};
use crate::error::{ErrorCode, ValidationError};

/// Validates a JSON value against the config schema.
///
/// Unknown top-level fields are ignored.
///
/// # Example
/// ```
/// use fitroom_core::validation::validate_config;
///
/// let raw = serde_json::json!({ "shapeKeys": { "waist": 0.42 } });
/// let config = validate_config(&raw).unwrap();
/// assert_eq!(config.shape_keys["waist"], 0.42);
///
/// let issues = validate_config(&serde_json::json!({ "shapeKeys": { "waist": "big" } }))
///     .unwrap_err();
/// assert_eq!(issues[0].path, "shapeKeys.waist");
/// ```
pub fn validate_config(raw: &Value) -> Result<PlaygroundConfig, Vec<ValidationError>> {
    let Some(root) = raw.as_object() else {
        return Err(vec![ValidationError::new(
            ErrorCode::ExpectedObject,
            format!("expected object, received {}", json_type(raw)),
        )]);
    };

    let mut errors = Vec::new();

    let version = optional_string(root, "version", &mut errors);
    let timestamp = optional_string(root, "timestamp", &mut errors);
    if let Some(ref ts) = timestamp {
        if DateTime::parse_from_rfc3339(ts).is_err() {
            errors.push(ValidationError::with_path(
                ErrorCode::InvalidDatetime,
                format!("invalid datetime: '{}'", ts),
                "timestamp",
            ));
        }
    }
    let model_info = validate_model_info(root, &mut errors);
    let shape_keys = validate_shape_keys(root, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    match shape_keys {
        Some(shape_keys) => Ok(PlaygroundConfig {
            version,
            timestamp,
            model_info,
            shape_keys,
        }),
        None => Err(vec![required("shapeKeys")]),
    }
}

/// Parses and validates a JSON document.
///
/// Syntax errors are reported as a single [`ErrorCode::MalformedJson`] issue.
pub fn validate_config_str(json: &str) -> Result<PlaygroundConfig, Vec<ValidationError>> {
    let raw: Value = serde_json::from_str(json).map_err(|e| {
        vec![ValidationError::new(
            ErrorCode::MalformedJson,
            format!("invalid JSON: {}", e),
        )]
    })?;
    validate_config(&raw)
}

fn optional_string(
    root: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match root.get(field)? {
        Value::String(s) => Some(s.clone()),
        other => {
            errors.push(expected(field, "string", other));
            None
        }
    }
}

fn validate_model_info(
    root: &Map<String, Value>,
    errors: &mut Vec<ValidationError>,
) -> Option<Vec<ModelInfo>> {
    let items = match root.get("modelInfo")? {
        Value::Array(items) => items,
        other => {
            errors.push(expected("modelInfo", "array", other));
            return None;
        }
    };

    let mut models = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("modelInfo.{}", i);
        let Some(obj) = item.as_object() else {
            errors.push(expected(&path, "object", item));
            continue;
        };

        let name_path = format!("{}.name", path);
        let name = match obj.get("name") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                errors.push(expected(&name_path, "string", other));
                None
            }
            None => {
                errors.push(required(&name_path));
                None
            }
        };

        let visible_path = format!("{}.visible", path);
        let visible = match obj.get("visible") {
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                errors.push(expected(&visible_path, "boolean", other));
                None
            }
            None => {
                errors.push(required(&visible_path));
                None
            }
        };

        if let (Some(name), Some(visible)) = (name, visible) {
            models.push(ModelInfo { name, visible });
        }
    }
    Some(models)
}

fn validate_shape_keys(
    root: &Map<String, Value>,
    errors: &mut Vec<ValidationError>,
) -> Option<BTreeMap<String, f64>> {
    let map = match root.get("shapeKeys") {
        Some(Value::Object(map)) => map,
        Some(other) => {
            errors.push(expected("shapeKeys", "object", other));
            return None;
        }
        None => {
            errors.push(required("shapeKeys"));
            return None;
        }
    };

    let mut shape_keys = BTreeMap::new();
    for (name, value) in map {
        let path = format!("shapeKeys.{}", name);
        match value.as_f64() {
            Some(v) if v.is_finite() => {
                shape_keys.insert(name.clone(), v);
            }
            Some(v) => errors.push(ValidationError::with_path(
                ErrorCode::NonFiniteNumber,
                format!("expected finite number, received {}", v),
                path,
            )),
            None => errors.push(expected(&path, "number", value)),
        }
    }
    Some(shape_keys)
}

fn required(path: &str) -> ValidationError {
    ValidationError::with_path(ErrorCode::MissingField, "required", path)
}

fn expected(path: &str, kind: &str, found: &Value) -> ValidationError {
    ValidationError::with_path(
        ErrorCode::InvalidType,
        format!("expected {}, received {}", kind, json_type(found)),
        path,
    )
}

/// Returns the JSON type name of a value.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
