//! Scene loading from manifests and glTF files.
//!
//! A scene manifest lists the assets of one avatar. Each asset either names
//! a glTF/GLB file (resolved relative to the manifest) whose morph targets are
//! discovered automatically, or spells its meshes out inline.
//!
//! ```json
//! {
//!   "assets": [
//!     { "name": "body", "gltf": "body.glb" },
//!     { "name": "skirt", "visible": false, "meshes": [
//!       { "name": "skirtMesh", "morphTargets": { "waistUp": 0, "waistDown": 1 } }
//!     ] }
//!   ]
//! }
//! ```

use fitroom_core::{AssetError, ExportSettings, LoadedAsset, LoadedMesh, Playground};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level scene manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneManifest {
    /// Assets in load order.
    pub assets: Vec<AssetEntry>,
}

/// One asset in a scene manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetEntry {
    /// Model name.
    pub name: String,
    /// Initial visibility.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// glTF or GLB file, relative to the manifest.
    #[serde(default)]
    pub gltf: Option<String>,
    /// Inline mesh descriptions.
    #[serde(default)]
    pub meshes: Vec<MeshEntry>,
}

/// An inline mesh description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MeshEntry {
    /// Mesh instance name.
    pub name: String,
    /// Morph-target name → influence index.
    pub morph_targets: BTreeMap<String, usize>,
    /// Length of the influence array.
    #[serde(default)]
    pub influence_count: Option<usize>,
}

fn default_visible() -> bool {
    true
}

/// Errors that can occur while loading a scene.
#[derive(Debug)]
pub enum SceneError {
    /// A file could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The manifest is not valid JSON or does not match the manifest shape.
    ManifestParse { path: PathBuf, message: String },
    /// A glTF file could not be parsed.
    GltfParse { path: PathBuf, message: String },
    /// An asset was rejected by the playground.
    Asset { name: String, source: AssetError },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::FileRead { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            SceneError::ManifestParse { path, message } => {
                write!(f, "invalid scene manifest {}: {}", path.display(), message)
            }
            SceneError::GltfParse { path, message } => {
                write!(f, "invalid glTF {}: {}", path.display(), message)
            }
            SceneError::Asset { name, source } => {
                write!(f, "asset '{}' rejected: {}", name, source)
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::FileRead { source, .. } => Some(source),
            SceneError::Asset { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reads a scene manifest and resolves every asset it lists.
pub fn load_scene(path: &Path) -> Result<Vec<LoadedAsset>, SceneError> {
    let text = std::fs::read_to_string(path).map_err(|source| SceneError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: SceneManifest =
        serde_json::from_str(&text).map_err(|e| SceneError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    manifest
        .assets
        .into_iter()
        .map(|entry| resolve_asset(entry, base_dir))
        .collect()
}

/// Loads a scene manifest into a fresh playground.
pub fn build_playground(path: &Path, settings: ExportSettings) -> Result<Playground, SceneError> {
    let mut playground = Playground::with_settings(settings);
    for asset in load_scene(path)? {
        let name = asset.name.clone();
        playground
            .load_asset(asset)
            .map_err(|source| SceneError::Asset { name, source })?;
    }
    Ok(playground)
}

fn resolve_asset(entry: AssetEntry, base_dir: &Path) -> Result<LoadedAsset, SceneError> {
    let mut asset = LoadedAsset::new(entry.name).visible(entry.visible);

    if let Some(gltf_path) = &entry.gltf {
        let full = base_dir.join(gltf_path);
        let bytes = std::fs::read(&full).map_err(|source| SceneError::FileRead {
            path: full.clone(),
            source,
        })?;
        for mesh in morph_meshes_from_slice(&bytes).map_err(|message| SceneError::GltfParse {
            path: full.clone(),
            message,
        })? {
            asset = asset.mesh(mesh);
        }
    }

    for mesh in entry.meshes {
        let mut loaded = LoadedMesh::new(mesh.name, mesh.morph_targets);
        if let Some(count) = mesh.influence_count {
            loaded = loaded.with_influence_count(count);
        }
        asset = asset.mesh(loaded);
    }

    Ok(asset)
}

/// Parses glTF JSON or GLB bytes and returns one mesh instance per node that
/// instances a mesh with morph targets.
pub fn morph_meshes_from_slice(bytes: &[u8]) -> Result<Vec<LoadedMesh>, String> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| e.to_string())?;
    Ok(morph_meshes(&gltf.document))
}

fn morph_meshes(doc: &gltf::Document) -> Vec<LoadedMesh> {
    let mut meshes = Vec::new();
    for node in doc.nodes() {
        let Some(mesh) = node.mesh() else {
            continue;
        };
        let count = morph_target_count(&mesh);
        if count == 0 {
            continue;
        }

        let mut names = target_names(&mesh);
        names.resize(count, String::new());
        let targets = names.into_iter().enumerate().map(|(index, name)| {
            if name.is_empty() {
                (index.to_string(), index)
            } else {
                (name, index)
            }
        });

        let instance = node
            .name()
            .or_else(|| mesh.name())
            .map(str::to_string)
            .unwrap_or_else(|| format!("node{}", node.index()));
        meshes.push(LoadedMesh::new(instance, targets).with_influence_count(count));
    }
    meshes
}

fn morph_target_count(mesh: &gltf::Mesh) -> usize {
    mesh.primitives()
        .map(|p| p.morph_targets().count())
        .max()
        .unwrap_or(0)
}

/// Reads `extras.targetNames` from a mesh.
fn target_names(mesh: &gltf::Mesh) -> Vec<String> {
    let Some(extras) = mesh.extras().as_ref() else {
        return Vec::new();
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(extras.get()) else {
        return Vec::new();
    };
    value
        .get("targetNames")
        .and_then(|v| v.as_array())
        .map(|names| {
            names
                .iter()
                .map(|n| n.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}
