//! Model visibility state.

use std::collections::BTreeMap;

use crate::config::ModelInfo;

/// Per-model visibility flags.
///
/// Overrides set through [`VisibilityState::set_visible`] win over the
/// defaults recorded when an asset is loaded. Model names are not checked
/// against the loaded scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityState {
    overrides: BTreeMap<String, bool>,
    defaults: BTreeMap<String, bool>,
}

impl VisibilityState {
    /// Creates an empty visibility state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the visibility of a model.
    pub fn set_visible(&mut self, name: impl Into<String>, visible: bool) {
        self.overrides.insert(name.into(), visible);
    }

    /// Returns the stored visibility of `name`, or `default_visible`.
    pub fn is_visible(&self, name: &str, default_visible: bool) -> bool {
        self.overrides.get(name).copied().unwrap_or(default_visible)
    }

    /// Records the default visibility of a loaded model.
    pub fn set_default(&mut self, name: impl Into<String>, visible: bool) {
        self.defaults.insert(name.into(), visible);
    }

    /// Returns the recorded default for `name`, if the model has been loaded.
    pub fn default_for(&self, name: &str) -> Option<bool> {
        self.defaults.get(name).copied()
    }

    /// Returns the stored override for `name`, if any.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.overrides.get(name).copied()
    }

    /// Lists every known model with its resolved visibility, by name.
    pub fn resolved(&self) -> Vec<ModelInfo> {
        let mut names: Vec<&String> = self.defaults.keys().chain(self.overrides.keys()).collect();
        names.sort();
        names.dedup();
        names
            .into_iter()
            .map(|name| ModelInfo {
                name: name.clone(),
                visible: self.is_visible(name, self.default_for(name).unwrap_or(true)),
            })
            .collect()
    }

    /// Returns true if no model is known.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.defaults.is_empty()
    }
}
