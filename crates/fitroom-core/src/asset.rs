//! Loaded-asset descriptions handed to the playground.
//!
//! Asset loaders (glTF readers, scene manifests, test fixtures) describe each
//! finished asset as a [`LoadedAsset`]: the model name, whether it starts
//! visible, and every mesh instance with its morph-target dictionary.

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// One mesh instance exposing morph targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedMesh {
    /// Mesh instance name.
    pub name: String,
    /// Morph-target name → influence index, in dictionary order.
    pub morph_targets: Vec<(String, usize)>,
    /// Length of the influence array; defaults to the highest index + 1.
    pub influence_count: Option<usize>,
}

impl LoadedMesh {
    /// Creates a mesh from `(name, index)` pairs.
    pub fn new<I, S>(name: impl Into<String>, morph_targets: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            morph_targets: morph_targets
                .into_iter()
                .map(|(target, index)| (target.into(), index))
                .collect(),
            influence_count: None,
        }
    }

    /// Sets an explicit influence-array length.
    pub fn with_influence_count(mut self, count: usize) -> Self {
        self.influence_count = Some(count);
        self
    }

    /// Returns the influence-array length this mesh needs.
    pub fn resolved_influence_count(&self) -> usize {
        self.influence_count.unwrap_or_else(|| {
            self.morph_targets
                .iter()
                .map(|(_, index)| index + 1)
                .max()
                .unwrap_or(0)
        })
    }

    fn check(&self) -> Result<(), AssetError> {
        let count = self.resolved_influence_count();
        for (target, index) in &self.morph_targets {
            if target.is_empty() {
                return Err(AssetError::EmptyName {
                    what: "morph target",
                });
            }
            if *index >= count {
                return Err(AssetError::IndexOutOfRange {
                    mesh: self.name.clone(),
                    target: target.clone(),
                    index: *index,
                    influence_count: count,
                });
            }
        }
        Ok(())
    }
}

/// A fully loaded asset (garment, body, accessory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedAsset {
    /// Model name used for visibility.
    pub name: String,
    /// Visibility before the user changes anything.
    pub default_visible: bool,
    /// Mesh instances with morph targets.
    pub meshes: Vec<LoadedMesh>,
}

impl LoadedAsset {
    /// Creates a visible asset with no meshes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_visible: true,
            meshes: Vec::new(),
        }
    }

    /// Sets the default visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }

    /// Adds a mesh instance.
    pub fn mesh(mut self, mesh: LoadedMesh) -> Self {
        self.meshes.push(mesh);
        self
    }

    /// Checks names and indices before anything is registered.
    pub fn check(&self) -> Result<(), AssetError> {
        if self.name.is_empty() {
            return Err(AssetError::EmptyName { what: "asset" });
        }
        self.meshes.iter().try_for_each(LoadedMesh::check)
    }
}

/// What loading one asset added to the playground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSummary {
    /// Model name.
    pub name: String,
    /// Number of mesh instances added.
    pub meshes: usize,
    /// Number of shape-key entries registered.
    pub entries: usize,
    /// Names that were not registered before this asset.
    pub new_shape_keys: Vec<String>,
}
