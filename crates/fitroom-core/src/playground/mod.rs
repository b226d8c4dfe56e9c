//! The playground: one avatar scene and every operation the UI drives.
//!
//! [`Playground`] owns the mesh arena, the shape-key registry and the
//! visibility state. Slider definitions are rebuilt whenever the registry
//! changes and cached until the next change.

mod import;


use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::apply;
use crate::asset::{AssetSummary, LoadedAsset};
use crate::category::{categorize, partition_by_category, CategorizedGroups, Category};
use crate::config::{format_timestamp, ExportSettings, PlaygroundConfig, CONFIG_VERSION};
use crate::error::{AssetError, ValidationError};
use crate::grouping::{group_shape_keys, GroupedShapeKey};
use crate::mesh::{MeshArena, MeshId, ShapeKeyEntry};
use crate::registry::ShapeKeyRegistry;
use crate::validation::{validate_config, validate_config_str};
use crate::visibility::VisibilityState;

pub use import::read_import_file;

/// Outcome of applying a config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    /// Shape-key names that were written.
    pub applied: Vec<String>,
    /// Shape-key names unknown to the scene.
    pub ignored: Vec<String>,
    /// Number of models whose visibility was set.
    pub models: usize,
}

#[derive(Debug, Clone, Default)]
struct GroupCache {
    version: u64,
    groups: Vec<GroupedShapeKey>,
}

/// An avatar scene: meshes, shape keys and model visibility.
#[derive(Debug, Clone, Default)]
pub struct Playground {
    arena: MeshArena,
    registry: ShapeKeyRegistry,
    visibility: VisibilityState,
    settings: ExportSettings,
    groups: GroupCache,
}

impl Playground {
    /// Creates an empty playground with default export settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty playground with the given export settings.
    pub fn with_settings(settings: ExportSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn arena(&self) -> &MeshArena {
        &self.arena
    }

    pub fn registry(&self) -> &ShapeKeyRegistry {
        &self.registry
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    /// Adds a loaded asset's meshes and registers their morph targets.
    ///
    /// The asset is checked first; a rejected asset changes nothing.
    pub fn load_asset(&mut self, asset: LoadedAsset) -> Result<AssetSummary, AssetError> {
        asset.check()?;

        let mut batch: Vec<(String, Vec<ShapeKeyEntry>)> = Vec::new();
        for mesh in &asset.meshes {
            let id = self
                .arena
                .insert(&asset.name, &mesh.name, mesh.resolved_influence_count());
            for (target, index) in &mesh.morph_targets {
                let entry = ShapeKeyEntry::new(id, *index);
                match batch.iter_mut().find(|(name, _)| name == target) {
                    Some((_, entries)) => entries.push(entry),
                    None => batch.push((target.clone(), vec![entry])),
                }
            }
        }

        let new_shape_keys: Vec<String> = batch
            .iter()
            .filter(|(name, _)| !self.registry.contains(name))
            .map(|(name, _)| name.clone())
            .collect();
        let entries: usize = batch.iter().map(|(_, e)| e.len()).sum();

        self.register(batch);
        self.visibility.set_default(&asset.name, asset.default_visible);

        tracing::info!(
            model = %asset.name,
            meshes = asset.meshes.len(),
            entries,
            new_shape_keys = new_shape_keys.len(),
            "asset loaded"
        );

        Ok(AssetSummary {
            name: asset.name,
            meshes: asset.meshes.len(),
            entries,
            new_shape_keys,
        })
    }

    /// Merges a batch of entries into the registry.
    pub fn register<I, S>(&mut self, batch: I)
    where
        I: IntoIterator<Item = (S, Vec<ShapeKeyEntry>)>,
        S: Into<String>,
    {
        self.registry.register(batch);
        self.refresh_groups();
    }

    /// Adds a bare mesh to the arena. Used by callers that build their own
    /// registration batches.
    pub fn add_mesh(&mut self, model: &str, name: &str, influence_count: usize) -> MeshId {
        self.arena.insert(model, name, influence_count)
    }

    /// Returns the entries registered under `name`, or an empty slice.
    pub fn get_entries(&self, name: &str) -> &[ShapeKeyEntry] {
        self.registry.get_entries(name)
    }

    /// Returns the slider definitions for everything registered so far.
    pub fn grouped_shape_keys(&self) -> &[GroupedShapeKey] {
        &self.groups.groups
    }

    /// Returns the slider that drives `name`, if any.
    pub fn find_group(&self, name: &str) -> Option<&GroupedShapeKey> {
        self.groups.groups.iter().find(|g| g.drives(name))
    }

    /// Returns the sliders split into UI panels.
    pub fn categorized_shape_keys(&self) -> CategorizedGroups {
        partition_by_category(&self.groups.groups)
    }

    /// Returns the UI category of a shape-key name.
    pub fn categorize(&self, name: &str) -> Category {
        categorize(name)
    }

    /// Writes `value` to every entry of `name`.
    pub fn apply_single(&mut self, name: &str, value: f64) {
        apply::apply_single(&self.registry, &mut self.arena, name, value);
    }

    /// Drives an Up/Down pair from one signed value.
    pub fn apply_combined(&mut self, up_key: &str, down_key: &str, value: f64) {
        apply::apply_combined(&self.registry, &mut self.arena, up_key, down_key, value);
    }

    /// Applies a slider value, dispatching on the slider kind.
    pub fn apply_group(&mut self, group: &GroupedShapeKey, value: f64) {
        apply::apply_group(&self.registry, &mut self.arena, group, value);
    }

    /// Applies a value to the slider with the given label.
    ///
    /// Returns false when no slider has that label.
    pub fn apply_slider(&mut self, label: &str, value: f64) -> bool {
        match self.groups.groups.iter().find(|g| g.label() == label) {
            Some(group) => {
                apply::apply_group(&self.registry, &mut self.arena, group, value);
                true
            }
            None => false,
        }
    }

    /// Zeroes every shape-key influence.
    pub fn reset_all(&mut self) {
        apply::reset_all(&self.registry, &mut self.arena);
    }

    /// Reads the live value of `name` from its first entry.
    pub fn current_value(&self, name: &str) -> Option<f64> {
        apply::current_value(&self.registry, &self.arena, name)
    }

    /// Reads the current position of a slider.
    pub fn slider_value(&self, group: &GroupedShapeKey) -> f64 {
        match group {
            GroupedShapeKey::Single { key, .. } => self.current_value(key).unwrap_or(0.0),
            GroupedShapeKey::Combined {
                up_key, down_key, ..
            } => apply::combined_value(&self.registry, &self.arena, up_key, down_key),
        }
    }

    /// Sets the visibility of a model.
    pub fn set_visible(&mut self, name: &str, visible: bool) {
        self.visibility.set_visible(name, visible);
    }

    /// Returns the visibility of a model, or `default_visible` if unset.
    pub fn is_visible(&self, name: &str, default_visible: bool) -> bool {
        self.visibility.is_visible(name, default_visible)
    }

    /// Snapshots the scene as a config stamped with the current time.
    pub fn export_config(&self) -> PlaygroundConfig {
        self.export_config_at(Utc::now())
    }

    /// Snapshots the scene as a config stamped with `time`.
    ///
    /// Each shape key is represented by the live value of its first entry.
    pub fn export_config_at(&self, time: DateTime<Utc>) -> PlaygroundConfig {
        let shape_keys: BTreeMap<String, f64> = self
            .registry
            .iter()
            .filter_map(|(name, entries)| {
                let first = entries.first()?;
                self.arena.influence(*first).map(|v| (name.to_string(), v))
            })
            .collect();

        PlaygroundConfig {
            version: Some(CONFIG_VERSION.to_string()),
            timestamp: Some(format_timestamp(time)),
            model_info: Some(self.visibility.resolved()),
            shape_keys,
        }
    }

    /// Returns the filename an export of `config` is saved under.
    pub fn export_filename(&self, config: &PlaygroundConfig) -> String {
        let timestamp = config
            .timestamp
            .clone()
            .unwrap_or_else(|| format_timestamp(Utc::now()));
        self.settings.filename_for(&timestamp)
    }

    /// Validates a raw JSON document against the config schema.
    pub fn validate_config(raw: &Value) -> Result<PlaygroundConfig, Vec<ValidationError>> {
        validate_config(raw)
    }

    /// Replays a validated config onto the scene.
    ///
    /// Up/Down pairs are driven together from the difference of their two
    /// values, so their order in the document does not matter. Names the
    /// scene does not know are skipped.
    pub fn apply_config(&mut self, config: &PlaygroundConfig) -> ApplySummary {
        let mut summary = ApplySummary::default();

        for group in &self.groups.groups {
            match group {
                GroupedShapeKey::Single { key, .. } => {
                    if let Some(&value) = config.shape_keys.get(key) {
                        apply::apply_single(&self.registry, &mut self.arena, key, value);
                        summary.applied.push(key.clone());
                    }
                }
                GroupedShapeKey::Combined {
                    up_key, down_key, ..
                } => {
                    let up = config.shape_keys.get(up_key).copied();
                    let down = config.shape_keys.get(down_key).copied();
                    if up.is_none() && down.is_none() {
                        continue;
                    }
                    let signed = up.unwrap_or(0.0) - down.unwrap_or(0.0);
                    if !signed.is_finite() {
                        tracing::warn!(
                            up_key = %up_key,
                            down_key = %down_key,
                            "skipping pair with overflowing difference"
                        );
                        continue;
                    }
                    apply::apply_combined(
                        &self.registry,
                        &mut self.arena,
                        up_key,
                        down_key,
                        signed,
                    );
                    summary.applied.extend(
                        [(up_key, up), (down_key, down)]
                            .into_iter()
                            .filter(|(_, v)| v.is_some())
                            .map(|(k, _)| k.clone()),
                    );
                }
            }
        }

        let known: HashSet<&str> = self.registry.names().collect();
        summary.ignored = config
            .shape_keys
            .keys()
            .filter(|name| !known.contains(name.as_str()))
            .cloned()
            .collect();
        if !summary.ignored.is_empty() {
            tracing::debug!(ignored = ?summary.ignored, "config names unknown to the scene");
        }

        if let Some(models) = &config.model_info {
            for model in models {
                self.visibility.set_visible(&model.name, model.visible);
            }
            summary.models = models.len();
        }

        summary
    }

    /// Validates a JSON value and applies it only if it is valid.
    pub fn import_value(&mut self, raw: &Value) -> Result<ApplySummary, Vec<ValidationError>> {
        self.import_validated(validate_config(raw))
    }

    /// Parses and validates a JSON document and applies it only if it is valid.
    pub fn import_str(&mut self, json: &str) -> Result<ApplySummary, Vec<ValidationError>> {
        self.import_validated(validate_config_str(json))
    }

    fn import_validated(
        &mut self,
        validated: Result<PlaygroundConfig, Vec<ValidationError>>,
    ) -> Result<ApplySummary, Vec<ValidationError>> {
        let config = validated.inspect_err(|issues| {
            tracing::warn!(issues = issues.len(), "config rejected");
        })?;
        let summary = self.apply_config(&config);
        tracing::info!(
            applied = summary.applied.len(),
            ignored = summary.ignored.len(),
            "config imported"
        );
        Ok(summary)
    }

    fn refresh_groups(&mut self) {
        let version = self.registry.version();
        if self.groups.version == version {
            return;
        }
        self.groups = GroupCache {
            version,
            groups: group_shape_keys(&self.registry),
        };
        tracing::debug!(
            version,
            sliders = self.groups.groups.len(),
            "rebuilt shape-key sliders"
        );
    }
}
