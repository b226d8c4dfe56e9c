//! Apply command implementation
//!
//! Imports a config file into a scene and prints the resulting influences.

use anyhow::{Context, Result};
use colored::Colorize;
use fitroom_core::{ExportSettings, ImportError};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, print_json, scene_error_to_json, validation_error_to_json, ApplyOutput,
    JsonError, MeshJson,
};
use super::reporting;
use crate::scene::build_playground;

/// Run the apply command
///
/// # Arguments
/// * `scene_path` - Path to the scene manifest
/// * `config_path` - Path to the config to import
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the config was applied, 1 otherwise
pub fn run(scene_path: &str, config_path: &str, json_output: bool) -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start runtime")?;

    if !json_output {
        println!("{} {}", "Applying:".cyan().bold(), config_path);
    }

    let mut playground = match build_playground(Path::new(scene_path), ExportSettings::default()) {
        Ok(p) => p,
        Err(e) if json_output => {
            print_json(&ApplyOutput {
                success: false,
                errors: vec![scene_error_to_json(&e)],
                summary: None,
                meshes: vec![],
            })?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e.into()),
    };

    let result = runtime.block_on(playground.import_file(config_path));

    if json_output {
        let output = match result {
            Ok(summary) => ApplyOutput {
                success: true,
                errors: vec![],
                summary: Some(summary),
                meshes: MeshJson::collect(&playground),
            },
            Err(ImportError::Invalid(issues)) => ApplyOutput {
                success: false,
                errors: issues.iter().map(validation_error_to_json).collect(),
                summary: None,
                meshes: vec![],
            },
            Err(e @ ImportError::Io { .. }) => ApplyOutput {
                success: false,
                errors: vec![JsonError::new(error_codes::FILE_READ, e.to_string())],
                summary: None,
                meshes: vec![],
            },
        };
        print_json(&output)?;
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    match result {
        Ok(summary) => {
            println!(
                "{} {} applied, {} model(s)",
                "Config:".dimmed(),
                summary.applied.len(),
                summary.models
            );
            for name in &summary.ignored {
                println!("  {} {} not in scene", "!".yellow(), name);
            }
            reporting::print_influences(&playground);
            println!("\n{} Config applied", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(ImportError::Invalid(issues)) => {
            reporting::print_issues(&issues);
            println!(
                "\n{} Config has {} error(s); nothing applied",
                "FAILED".red().bold(),
                issues.len()
            );
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e.into()),
    }
}
