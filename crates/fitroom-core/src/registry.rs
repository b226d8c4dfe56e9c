//! Shape-key registry.
//!
//! The registry maps a shape-key name to every mesh slot that responds to it.
//! It only grows: registering a name that already exists appends the new
//! entries after the old ones.

use std::collections::HashMap;

use crate::mesh::ShapeKeyEntry;

/// Name → entry-list mapping, kept in first-registration order.
#[derive(Debug, Clone, Default)]
pub struct ShapeKeyRegistry {
    slots: Vec<(String, Vec<ShapeKeyEntry>)>,
    by_name: HashMap<String, usize>,
    version: u64,
}

impl ShapeKeyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a batch of entries into the registry.
    ///
    /// Entries for a name that is already present are appended to its list.
    /// No deduplication is performed.
    pub fn register<I, S>(&mut self, batch: I)
    where
        I: IntoIterator<Item = (S, Vec<ShapeKeyEntry>)>,
        S: Into<String>,
    {
        let mut changed = false;
        for (name, entries) in batch {
            let name = name.into();
            match self.by_name.get(&name) {
                Some(&slot) => {
                    if !entries.is_empty() {
                        self.slots[slot].1.extend(entries);
                        changed = true;
                    }
                }
                None => {
                    self.by_name.insert(name.clone(), self.slots.len());
                    self.slots.push((name, entries));
                    changed = true;
                }
            }
        }
        if changed {
            self.version += 1;
        }
    }

    /// Returns the entries registered under `name`, or an empty slice.
    pub fn get_entries(&self, name: &str) -> &[ShapeKeyEntry] {
        self.by_name
            .get(name)
            .map(|&slot| self.slots[slot].1.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if `name` has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates over names in first-registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(name, entries)` pairs in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ShapeKeyEntry])> {
        self.slots
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Returns the number of distinct names.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the total number of entries across all names.
    pub fn entry_count(&self) -> usize {
        self.slots.iter().map(|(_, entries)| entries.len()).sum()
    }

    /// Returns a counter that changes whenever the registry contents change.
    pub fn version(&self) -> u64 {
        self.version
    }
}
