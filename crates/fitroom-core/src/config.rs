//! Playground configuration document and export settings.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Version tag written into exported configs.
pub const CONFIG_VERSION: &str = "1.0";

/// Default prefix of exported config filenames.
pub const DEFAULT_FILENAME_PREFIX: &str = "avatar-shapekeys";

/// Visibility of one model in an exported config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model name.
    pub name: String,
    /// Whether the model is shown.
    pub visible: bool,
}

impl ModelInfo {
    /// Creates a new model info item.
    pub fn new(name: impl Into<String>, visible: bool) -> Self {
        Self {
            name: name.into(),
            visible,
        }
    }
}

/// Snapshot of an avatar: model visibility plus one value per shape key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundConfig {
    /// Format version tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// ISO-8601 export time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Model visibility at export time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_info: Option<Vec<ModelInfo>>,

    /// Shape-key name → influence value.
    pub shape_keys: BTreeMap<String, f64>,
}

impl PlaygroundConfig {
    /// Creates a config holding only shape-key values.
    pub fn with_shape_keys(shape_keys: BTreeMap<String, f64>) -> Self {
        Self {
            version: None,
            timestamp: None,
            model_info: None,
            shape_keys,
        }
    }

    /// Serializes the config to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the config to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Settings that shape exported files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Prefix of exported filenames.
    pub filename_prefix: String,
    /// Whether exported JSON is pretty-printed.
    pub pretty: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            pretty: true,
        }
    }
}

impl ExportSettings {
    /// Parses settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the filename for a config exported at `timestamp`.
    pub fn filename_for(&self, timestamp: &str) -> String {
        export_filename(&self.filename_prefix, timestamp)
    }

    /// Serializes a config using these settings.
    pub fn render(&self, config: &PlaygroundConfig) -> Result<String, serde_json::Error> {
        if self.pretty {
            config.to_json_pretty()
        } else {
            config.to_json()
        }
    }
}

/// Formats a time as an ISO-8601 UTC timestamp with milliseconds.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use fitroom_core::config::format_timestamp;
///
/// let t = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(format_timestamp(t), "2025-01-01T00:00:00.000Z");
/// ```
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds an export filename: `<prefix>-<timestamp>.json` with `:` and `.`
/// in the timestamp replaced by `-`.
pub fn export_filename(prefix: &str, timestamp: &str) -> String {
    format!("{}-{}.json", prefix, timestamp.replace([':', '.'], "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename(DEFAULT_FILENAME_PREFIX, "2025-01-01T00:00:00.000Z"),
            "avatar-shapekeys-2025-01-01T00-00-00-000Z.json"
        );
    }

    #[test]
    fn test_serializes_camel_case_and_skips_none() {
        let mut shape_keys = BTreeMap::new();
        shape_keys.insert("waist".to_string(), 0.42);
        let config = PlaygroundConfig {
            version: Some(CONFIG_VERSION.to_string()),
            timestamp: None,
            model_info: Some(vec![ModelInfo::new("bodice", true)]),
            shape_keys,
        };

        let value = config.to_value().unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "version": "1.0",
                "modelInfo": [{ "name": "bodice", "visible": true }],
                "shapeKeys": { "waist": 0.42 }
            })
        );
    }

    #[test]
    fn test_settings_defaults() {
        let settings = ExportSettings::from_json("{}").unwrap();
        assert_eq!(settings, ExportSettings::default());

        let settings = ExportSettings::from_json(r#"{"filename_prefix": "fit"}"#).unwrap();
        assert_eq!(settings.filename_for("t:1.2"), "fit-t-1-2.json");
        assert!(settings.pretty);
    }

    #[test]
    fn test_settings_reject_unknown_fields() {
        assert!(ExportSettings::from_json(r#"{"prefix": "fit"}"#).is_err());
    }
}
