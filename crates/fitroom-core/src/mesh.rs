//! Mesh arena and shape-key entries.
//!
//! Loaded mesh instances live in a [`MeshArena`] and are addressed by a
//! stable [`MeshId`]. A [`ShapeKeyEntry`] binds one shape-key name to one slot
//! of one mesh's influence array, so many names can point at the same mesh
//! without sharing mutable references.

use serde::{Deserialize, Serialize};

/// Stable handle to a mesh stored in a [`MeshArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshId(u32);

impl MeshId {
    /// Returns the arena slot of this mesh.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for MeshId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// One (mesh, influence slot) binding for a shape key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeKeyEntry {
    /// Mesh that owns the influence array.
    pub mesh: MeshId,
    /// Offset into the mesh's influence array.
    pub index: usize,
}

impl ShapeKeyEntry {
    /// Creates a new entry.
    pub fn new(mesh: MeshId, index: usize) -> Self {
        Self { mesh, index }
    }
}

/// A loaded mesh instance and its morph influences.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRecord {
    /// Name of the model (asset) this mesh belongs to.
    pub model: String,
    /// Mesh instance name.
    pub name: String,
    /// Current morph-target weights, indexed by target position.
    pub influences: Vec<f64>,
}

/// Owner of every loaded mesh's influence array.
#[derive(Debug, Clone, Default)]
pub struct MeshArena {
    meshes: Vec<MeshRecord>,
}

impl MeshArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mesh with `influence_count` zeroed influence slots.
    pub fn insert(
        &mut self,
        model: impl Into<String>,
        name: impl Into<String>,
        influence_count: usize,
    ) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(MeshRecord {
            model: model.into(),
            name: name.into(),
            influences: vec![0.0; influence_count],
        });
        id
    }

    /// Returns the mesh record for `id`.
    pub fn get(&self, id: MeshId) -> Option<&MeshRecord> {
        self.meshes.get(id.index())
    }

    /// Returns the influence array of `id`, or an empty slice for unknown ids.
    pub fn influences(&self, id: MeshId) -> &[f64] {
        self.get(id).map(|m| m.influences.as_slice()).unwrap_or(&[])
    }

    /// Reads the influence an entry points at.
    pub fn influence(&self, entry: ShapeKeyEntry) -> Option<f64> {
        self.influences(entry.mesh).get(entry.index).copied()
    }

    /// Writes the influence an entry points at.
    ///
    /// Returns false when the mesh or slot does not exist.
    pub fn set_influence(&mut self, entry: ShapeKeyEntry, value: f64) -> bool {
        match self
            .meshes
            .get_mut(entry.mesh.index())
            .and_then(|m| m.influences.get_mut(entry.index))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Iterates over all meshes with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &MeshRecord)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, m)| (MeshId(i as u32), m))
    }

    /// Returns the number of meshes.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns true if no mesh has been loaded.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_zeroes_influences() {
        let mut arena = MeshArena::new();
        let id = arena.insert("body", "torso", 4);
        assert_eq!(arena.influences(id), &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(arena.get(id).unwrap().model, "body");
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_set_influence_out_of_range() {
        let mut arena = MeshArena::new();
        let id = arena.insert("body", "torso", 2);

        assert!(arena.set_influence(ShapeKeyEntry::new(id, 1), 0.5));
        assert!(!arena.set_influence(ShapeKeyEntry::new(id, 2), 0.5));
        assert_eq!(arena.influence(ShapeKeyEntry::new(id, 1)), Some(0.5));
        assert_eq!(arena.influence(ShapeKeyEntry::new(id, 2)), None);
    }

    #[test]
    fn test_unknown_mesh_reads_empty() {
        let arena = MeshArena::new();
        assert!(arena.influences(MeshId(7)).is_empty());
        assert_eq!(arena.influence(ShapeKeyEntry::new(MeshId(7), 0)), None);
    }
}
