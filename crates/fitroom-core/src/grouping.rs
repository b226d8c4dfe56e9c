//! Grouping engine.
//!
//! Turns the flat registry into the list of sliders the UI shows. Shape keys
//! named `<base>Up` and `<base>Down` collapse into one bidirectional slider
//! when both halves are registered; everything else is a plain 0..1 slider.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::category::{categorize, Category};
use crate::mesh::ShapeKeyEntry;
use crate::registry::ShapeKeyRegistry;

/// Suffix of the positive half of a combined pair.
pub const UP_SUFFIX: &str = "Up";

/// Suffix of the negative half of a combined pair.
pub const DOWN_SUFFIX: &str = "Down";

/// A slider definition derived from the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupedShapeKey {
    /// A 0..1 slider driving one shape key.
    Single {
        key: String,
        label: String,
        entries: Vec<ShapeKeyEntry>,
    },
    /// A -1..1 slider; positive drives `up_key`, negative drives `down_key`.
    Combined {
        base: String,
        label: String,
        up_key: String,
        down_key: String,
        up_entries: Vec<ShapeKeyEntry>,
        down_entries: Vec<ShapeKeyEntry>,
    },
}

impl GroupedShapeKey {
    /// Returns the display label.
    pub fn label(&self) -> &str {
        match self {
            GroupedShapeKey::Single { label, .. } | GroupedShapeKey::Combined { label, .. } => {
                label
            }
        }
    }

    /// Returns true for Up/Down pairs.
    pub fn is_combined(&self) -> bool {
        matches!(self, GroupedShapeKey::Combined { .. })
    }

    /// Returns the shape-key names this slider drives.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            GroupedShapeKey::Single { key, .. } => vec![key.as_str()],
            GroupedShapeKey::Combined {
                up_key, down_key, ..
            } => vec![up_key.as_str(), down_key.as_str()],
        }
    }

    /// Returns true if this slider drives `name`.
    pub fn drives(&self, name: &str) -> bool {
        self.keys().contains(&name)
    }

    /// Returns the number of mesh slots this slider writes to.
    pub fn entry_count(&self) -> usize {
        match self {
            GroupedShapeKey::Single { entries, .. } => entries.len(),
            GroupedShapeKey::Combined {
                up_entries,
                down_entries,
                ..
            } => up_entries.len() + down_entries.len(),
        }
    }

    /// Returns the slider range.
    pub fn range(&self) -> (f64, f64) {
        if self.is_combined() {
            (-1.0, 1.0)
        } else {
            (0.0, 1.0)
        }
    }

    /// Returns the UI category. Combined sliders are categorized by their up key.
    pub fn category(&self) -> Category {
        match self {
            GroupedShapeKey::Single { key, .. } => categorize(key),
            GroupedShapeKey::Combined { up_key, .. } => categorize(up_key),
        }
    }
}

/// Splits a trailing `up` / `down` (any ASCII case) off a name.
///
/// Returns the base with its original casing, or `None` when neither suffix
/// is present. An empty base is allowed.
pub fn split_direction_suffix(name: &str) -> Option<&str> {
    strip_suffix_ignore_case(name, "up").or_else(|| strip_suffix_ignore_case(name, "down"))
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (base, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(base)
}

/// Builds the slider list for the current registry contents.
///
/// Names are visited in registration order. A name whose canonical
/// `<base>Up` / `<base>Down` partner exists becomes one combined slider;
/// the result is sorted by label with [`locale_cmp`].
///
/// # Example
/// ```
/// use fitroom_core::grouping::group_shape_keys;
/// use fitroom_core::mesh::{MeshArena, ShapeKeyEntry};
/// use fitroom_core::registry::ShapeKeyRegistry;
///
/// let mut arena = MeshArena::new();
/// let mesh = arena.insert("body", "torso", 3);
/// let mut registry = ShapeKeyRegistry::new();
/// registry.register([
///     ("waistUp", vec![ShapeKeyEntry::new(mesh, 0)]),
///     ("waistDown", vec![ShapeKeyEntry::new(mesh, 1)]),
///     ("neck", vec![ShapeKeyEntry::new(mesh, 2)]),
/// ]);
///
/// let groups = group_shape_keys(&registry);
/// let labels: Vec<&str> = groups.iter().map(|g| g.label()).collect();
/// assert_eq!(labels, vec!["neck", "waist"]);
/// ```
pub fn group_shape_keys(registry: &ShapeKeyRegistry) -> Vec<GroupedShapeKey> {
    let mut consumed: HashSet<String> = HashSet::new();
    let mut groups = Vec::with_capacity(registry.len());

    for (name, entries) in registry.iter() {
        if consumed.contains(name) {
            continue;
        }

        if let Some(base) = split_direction_suffix(name) {
            let up_key = format!("{}{}", base, UP_SUFFIX);
            let down_key = format!("{}{}", base, DOWN_SUFFIX);
            let is_canonical = name == up_key || name == down_key;

            if is_canonical && registry.contains(&up_key) && registry.contains(&down_key) {
                consumed.insert(up_key.clone());
                consumed.insert(down_key.clone());
                groups.push(GroupedShapeKey::Combined {
                    base: base.to_string(),
                    label: base.to_string(),
                    up_entries: registry.get_entries(&up_key).to_vec(),
                    down_entries: registry.get_entries(&down_key).to_vec(),
                    up_key,
                    down_key,
                });
                continue;
            }
        }

        groups.push(GroupedShapeKey::Single {
            key: name.to_string(),
            label: name.to_string(),
            entries: entries.to_vec(),
        });
    }

    groups.sort_by(|a, b| locale_cmp(a.label(), b.label()));
    groups
}

/// Compares two labels the way a UI collator would.
///
/// Case-insensitive first; on a tie lower-case sorts before upper-case, then
/// by code point.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        if ca.is_lowercase() && cb.is_uppercase() {
            return Ordering::Less;
        }
        if ca.is_uppercase() && cb.is_lowercase() {
            return Ordering::Greater;
        }
        return ca.cmp(&cb);
    }
    a.cmp(b)
}
