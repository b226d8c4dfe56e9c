//! Fitroom Shape-Key Library
//!
//! This crate tracks the morph targets ("shape keys") exposed by the meshes of
//! an avatar scene and turns them into UI sliders. Garments and bodies are
//! loaded as separate assets; targets with the same name across assets are
//! driven together.
//!
//! # Overview
//!
//! - **Registry**: shape-key name → every `(mesh, influence index)` it drives
//! - **Grouping**: `<base>Up` / `<base>Down` pairs collapse into one bipolar slider
//! - **Categories**: sliders are split into general, detailed and advanced panels
//! - **Configs**: the scene state round-trips through a validated JSON document
//!
//! # Example
//!
//! ```
//! use fitroom_core::{LoadedAsset, LoadedMesh, Playground};
//!
//! let mut playground = Playground::new();
//! playground
//!     .load_asset(LoadedAsset::new("body").mesh(LoadedMesh::new(
//!         "torso",
//!         [("height", 0), ("waistUp", 1), ("waistDown", 2)],
//!     )))
//!     .unwrap();
//!
//! // One slider for height, one bipolar slider for the waist pair.
//! assert_eq!(playground.grouped_shape_keys().len(), 2);
//!
//! playground.apply_combined("waistUp", "waistDown", -0.5);
//! assert_eq!(playground.current_value("waistDown"), Some(0.5));
//!
//! let config = playground.export_config();
//! let json = config.to_json().unwrap();
//!
//! let mut restored = Playground::new();
//! restored
//!     .load_asset(LoadedAsset::new("body").mesh(LoadedMesh::new(
//!         "torso",
//!         [("height", 0), ("waistUp", 1), ("waistDown", 2)],
//!     )))
//!     .unwrap();
//! restored.import_str(&json).unwrap();
//! assert_eq!(restored.current_value("waistDown"), Some(0.5));
//! ```
//!
//! # Modules
//!
//! - [`mesh`]: Mesh arena and shape-key entries
//! - [`registry`]: Name → entries registry
//! - [`grouping`]: Slider definitions and Up/Down pairing
//! - [`category`]: Keyword categorization into UI panels
//! - [`apply`]: Writing slider values into influences
//! - [`visibility`]: Per-model visibility state
//! - [`config`]: Config document and export settings
//! - [`validation`]: Config validation with path-qualified errors
//! - [`hash`]: Config fingerprints
//! - [`playground`]: The scene facade tying everything together

pub mod apply;
pub mod asset;
pub mod category;
pub mod config;
pub mod error;
pub mod grouping;
pub mod hash;
pub mod mesh;
pub mod playground;
pub mod registry;
pub mod validation;
pub mod visibility;

// Re-export commonly used types at the crate root
pub use asset::{AssetSummary, LoadedAsset, LoadedMesh};
pub use category::{categorize, CategorizedGroups, Category};
pub use config::{
    export_filename, format_timestamp, ExportSettings, ModelInfo, PlaygroundConfig,
    CONFIG_VERSION, DEFAULT_FILENAME_PREFIX,
};
pub use error::{AssetError, ErrorCode, FitroomError, ImportError, ValidationError};
pub use grouping::{group_shape_keys, GroupedShapeKey};
pub use hash::config_fingerprint;
pub use mesh::{MeshArena, MeshId, ShapeKeyEntry};
pub use playground::{read_import_file, ApplySummary, Playground};
pub use registry::ShapeKeyRegistry;
pub use validation::{validate_config, validate_config_str};
pub use visibility::VisibilityState;
