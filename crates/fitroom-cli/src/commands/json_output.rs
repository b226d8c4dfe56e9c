//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; the types here are what gets printed in
//! that mode so scripts can parse results without scraping colored text.

use anyhow::Result;
use fitroom_core::{ApplySummary, GroupedShapeKey, ModelInfo, Playground, ValidationError};
use serde::Serialize;

use crate::scene::SceneError;

/// Error codes for CLI operations.
///
/// Config validation errors pass through their own `C00x` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Scene manifest could not be parsed
    pub const SCENE_PARSE: &str = "CLI_002";
    /// glTF file could not be parsed
    pub const GLTF_PARSE: &str = "CLI_003";
    /// Asset rejected during registration
    pub const ASSET_REJECTED: &str = "CLI_004";
    /// Bad command-line value
    pub const INVALID_ARGUMENT: &str = "CLI_005";
    /// Export settings file could not be parsed
    pub const SETTINGS_PARSE: &str = "CLI_006";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_007";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "C004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Dotted path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the field path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Converts a config validation issue to a JsonError.
pub fn validation_error_to_json(err: &ValidationError) -> JsonError {
    let error = JsonError::new(err.code.to_string(), &err.message);
    if err.is_root() {
        error
    } else {
        error.with_path(&err.path)
    }
}

/// Converts a scene loading failure to a JsonError.
pub fn scene_error_to_json(err: &SceneError) -> JsonError {
    let code = match err {
        SceneError::FileRead { .. } => error_codes::FILE_READ,
        SceneError::ManifestParse { .. } => error_codes::SCENE_PARSE,
        SceneError::GltfParse { .. } => error_codes::GLTF_PARSE,
        SceneError::Asset { .. } => error_codes::ASSET_REJECTED,
    };
    JsonError::new(code, err.to_string())
}

/// One slider in `inspect` output.
#[derive(Debug, Clone, Serialize)]
pub struct SliderJson {
    pub label: String,
    /// "single" or "combined"
    pub kind: &'static str,
    pub category: String,
    pub keys: Vec<String>,
    pub entries: usize,
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

impl SliderJson {
    pub fn from_group(playground: &Playground, group: &GroupedShapeKey) -> Self {
        let (min, max) = group.range();
        Self {
            label: group.label().to_string(),
            kind: if group.is_combined() {
                "combined"
            } else {
                "single"
            },
            category: group.category().to_string(),
            keys: group.keys().into_iter().map(str::to_string).collect(),
            entries: group.entry_count(),
            min,
            max,
            value: playground.slider_value(group),
        }
    }
}

/// Influence table of one mesh instance.
#[derive(Debug, Clone, Serialize)]
pub struct MeshJson {
    pub model: String,
    pub name: String,
    pub influences: Vec<f64>,
}

impl MeshJson {
    pub fn collect(playground: &Playground) -> Vec<Self> {
        playground
            .arena()
            .iter()
            .map(|(_, mesh)| Self {
                model: mesh.model.clone(),
                name: mesh.name.clone(),
                influences: mesh.influences.clone(),
            })
            .collect()
    }
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sliders: Vec<SliderJson>,
}

/// Output of `validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    /// Config fingerprint (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Output of `export --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    /// Path of the written config (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Output of `apply --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ApplySummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meshes: Vec<MeshJson>,
}

/// Prints a JSON output record to stdout.
pub fn print_json<T: Serialize>(output: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
