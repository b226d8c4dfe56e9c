//! Test fixture utilities for building avatar scenes.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use fitroom_core::{LoadedAsset, LoadedMesh, Playground};

/// Body with a head mesh and a torso mesh.
pub fn body_asset() -> LoadedAsset {
    LoadedAsset::new("body")
        .mesh(LoadedMesh::new("head", [("neck", 0), ("height", 1)]))
        .mesh(LoadedMesh::new(
            "torso",
            [
                ("height", 0),
                ("waistUp", 1),
                ("waistDown", 2),
                ("bicepUp", 3),
                ("bicepDown", 4),
            ],
        ))
}

/// Skirt that follows the body's waist and adds its own hem.
pub fn skirt_asset() -> LoadedAsset {
    LoadedAsset::new("skirt").mesh(LoadedMesh::new(
        "skirtMesh",
        [("waistUp", 0), ("waistDown", 1), ("hemShape", 2)],
    ))
}

/// Jacket that starts hidden and only has the up half of the bicep pair.
pub fn jacket_asset() -> LoadedAsset {
    LoadedAsset::new("jacket")
        .visible(false)
        .mesh(LoadedMesh::new("sleeve", [("bicepUp", 0), ("shoulderSpace", 1)]))
}

/// Playground with the body, skirt and jacket loaded.
pub fn sample_playground() -> Playground {
    let mut playground = Playground::new();
    for asset in [body_asset(), skirt_asset(), jacket_asset()] {
        playground
            .load_asset(asset)
            .expect("fixture assets are well formed");
    }
    playground
}

/// Influence array of the first mesh instance with the given name.
pub fn influences(playground: &Playground, mesh: &str) -> Vec<f64> {
    playground
        .arena()
        .iter()
        .find(|(_, m)| m.name == mesh)
        .map(|(_, m)| m.influences.clone())
        .unwrap_or_else(|| panic!("no mesh named {}", mesh))
}

/// Snapshot of every influence array in arena order.
pub fn all_influences(playground: &Playground) -> Vec<Vec<f64>> {
    playground
        .arena()
        .iter()
        .map(|(_, m)| m.influences.clone())
        .collect()
}

/// Minimal glTF document with one morphed mesh instanced by one node.
pub const TORSO_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "buffers": [{ "uri": "torso.bin", "byteLength": 36 }],
    "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
    "accessors": [{
        "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
        "min": [0, 0, 0], "max": [1, 1, 0]
    }],
    "meshes": [{
        "name": "torso",
        "primitives": [{
            "attributes": { "POSITION": 0 },
            "targets": [{ "POSITION": 0 }, { "POSITION": 0 }, { "POSITION": 0 }]
        }],
        "extras": { "targetNames": ["height", "waistUp", "waistDown"] }
    }],
    "nodes": [{ "name": "BodyTorso", "mesh": 0 }],
    "scenes": [{ "nodes": [0] }],
    "scene": 0
}"#;

/// Scene manifest pointing at the glTF body and an inline skirt.
pub const SAMPLE_MANIFEST: &str = r#"{
    "assets": [
        { "name": "body", "gltf": "body.gltf" },
        { "name": "skirt", "visible": false, "meshes": [
            { "name": "skirtMesh", "morphTargets": { "waistUp": 0, "waistDown": 1, "hemShape": 2 } }
        ] }
    ]
}"#;

/// A temporary directory holding scene and config files.
pub struct SceneFixture {
    pub root: TempDir,
}

impl SceneFixture {
    /// Create a new empty fixture directory.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a file relative to the fixture root.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    /// Write the sample scene (glTF body plus inline skirt) and return the
    /// manifest path.
    pub fn sample_scene(&self) -> PathBuf {
        self.write("body.gltf", TORSO_GLTF);
        self.write("scene.json", SAMPLE_MANIFEST)
    }

    /// Return the single file in `dir`, relative to the root.
    pub fn only_file_in(&self, dir: &str) -> PathBuf {
        let mut entries: Vec<PathBuf> = fs::read_dir(self.path().join(dir))
            .expect("Failed to read fixture dir")
            .map(|e| e.expect("Failed to read entry").path())
            .collect();
        assert_eq!(entries.len(), 1, "expected exactly one file in {}", dir);
        entries.remove(0)
    }
}

impl Default for SceneFixture {
    fn default() -> Self {
        Self::new()
    }
}
