//! Export command implementation
//!
//! Builds an avatar from a scene, optional base config and slider overrides,
//! then writes the resulting config under its timestamped filename.

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use fitroom_core::{config_fingerprint, ExportSettings, Playground};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::{
    error_codes, print_json, scene_error_to_json, validation_error_to_json, ExportOutput,
    JsonError,
};
use super::reporting;
use crate::scene::build_playground;

/// Options for the export command.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Scene manifest path.
    pub scene: String,
    /// Config applied before the overrides.
    pub config: Option<String>,
    /// `name=value` slider overrides, applied in order.
    pub set: Vec<String>,
    /// Models to hide.
    pub hide: Vec<String>,
    /// Models to show.
    pub show: Vec<String>,
    /// Output directory (default: current directory).
    pub out_dir: Option<String>,
    /// Export settings file.
    pub settings: Option<String>,
}

/// A failure that maps onto one JSON error record.
struct ExportFailure {
    error: JsonError,
    issues: Vec<JsonError>,
}

impl ExportFailure {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: JsonError::new(code, message),
            issues: vec![],
        }
    }
}

/// Run the export command
///
/// # Returns
/// Exit code: 0 if the config was written, 1 otherwise
pub fn run(options: &ExportOptions, json_output: bool) -> Result<ExitCode> {
    if !json_output {
        println!("{} {}", "Exporting:".cyan().bold(), options.scene);
    }

    match export(options) {
        Ok((path, fingerprint)) => {
            if json_output {
                print_json(&ExportOutput {
                    success: true,
                    errors: vec![],
                    path: Some(path.display().to_string()),
                    fingerprint: Some(fingerprint),
                })?;
            } else {
                println!("{} {}", "Wrote:".dimmed(), path.display());
                println!(
                    "{} {}",
                    "Fingerprint:".dimmed(),
                    reporting::short_hash(&fingerprint)
                );
                println!("\n{} Config exported", "SUCCESS".green().bold());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            if json_output {
                let mut errors = vec![failure.error];
                errors.extend(failure.issues);
                print_json(&ExportOutput {
                    success: false,
                    errors,
                    path: None,
                    fingerprint: None,
                })?;
                Ok(ExitCode::from(1))
            } else {
                for issue in &failure.issues {
                    println!("  {} {}", "x".red(), format_json_error(issue));
                }
                Err(anyhow!(failure.error.message))
            }
        }
    }
}

fn export(options: &ExportOptions) -> Result<(PathBuf, String), ExportFailure> {
    let settings = match &options.settings {
        Some(path) => load_settings(path)
            .map_err(|e| ExportFailure::new(error_codes::SETTINGS_PARSE, format!("{:#}", e)))?,
        None => ExportSettings::default(),
    };

    let mut playground = build_playground(Path::new(&options.scene), settings).map_err(|e| {
        ExportFailure {
            error: scene_error_to_json(&e),
            issues: vec![],
        }
    })?;

    if let Some(config_path) = &options.config {
        let text = std::fs::read_to_string(config_path).map_err(|e| {
            ExportFailure::new(
                error_codes::FILE_READ,
                format!("Failed to read config file {}: {}", config_path, e),
            )
        })?;
        playground.import_str(&text).map_err(|issues| ExportFailure {
            error: JsonError::new(
                error_codes::INVALID_ARGUMENT,
                format!("config {} rejected with {} issue(s)", config_path, issues.len()),
            ),
            issues: issues.iter().map(validation_error_to_json).collect(),
        })?;
    }

    for assignment in &options.set {
        apply_assignment(&mut playground, assignment)
            .map_err(|e| ExportFailure::new(error_codes::INVALID_ARGUMENT, e.to_string()))?;
    }
    for model in &options.hide {
        playground.set_visible(model, false);
    }
    for model in &options.show {
        playground.set_visible(model, true);
    }

    let config = playground.export_config();
    let rendered = playground
        .settings()
        .render(&config)
        .map_err(|e| ExportFailure::new(error_codes::FILE_WRITE, e.to_string()))?;
    let fingerprint = config_fingerprint(&config)
        .map_err(|e| ExportFailure::new(error_codes::FILE_WRITE, e.to_string()))?;

    let out_dir = PathBuf::from(options.out_dir.as_deref().unwrap_or("."));
    let path = out_dir.join(playground.export_filename(&config));
    std::fs::create_dir_all(&out_dir)
        .and_then(|_| std::fs::write(&path, rendered))
        .map_err(|e| {
            ExportFailure::new(
                error_codes::FILE_WRITE,
                format!("Failed to write {}: {}", path.display(), e),
            )
        })?;

    tracing::info!(path = %path.display(), shape_keys = config.shape_keys.len(), "config exported");
    Ok((path, fingerprint))
}

fn load_settings(path: &str) -> Result<ExportSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path))?;
    ExportSettings::from_json(&text).with_context(|| format!("Invalid settings file: {}", path))
}

/// Parses `name=value`.
pub fn parse_assignment(raw: &str) -> Result<(&str, f64)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name=value, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("missing shape-key name in '{}'", raw);
    }
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value in '{}'", raw))?;
    if !value.is_finite() {
        bail!("value in '{}' must be finite", raw);
    }
    Ok((name, value))
}

/// Applies one `name=value` override.
///
/// A slider label takes precedence, so `waist=-0.3` drives a combined pair;
/// otherwise the name must be a registered shape key.
fn apply_assignment(playground: &mut Playground, raw: &str) -> Result<()> {
    let (name, value) = parse_assignment(raw)?;
    if playground.apply_slider(name, value) {
        return Ok(());
    }
    if playground.get_entries(name).is_empty() {
        bail!("unknown shape key '{}'", name);
    }
    playground.apply_single(name, value);
    Ok(())
}

fn format_json_error(error: &JsonError) -> String {
    match &error.path {
        Some(path) => format!("{}: {} (at {})", error.code, error.message, path),
        None => format!("{}: {}", error.code, error.message),
    }
}
