//! Validate command implementation
//!
//! Checks a config file against the config schema without a scene.

use anyhow::{Context, Result};
use colored::Colorize;
use fitroom_core::{config_fingerprint, validate_config_str};
use std::process::ExitCode;

use super::json_output::{
    error_codes, print_json, validation_error_to_json, JsonError, ValidateOutput,
};
use super::reporting;

/// Run the validate command
///
/// # Arguments
/// * `config_path` - Path to the config file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config_path)
    } else {
        run_human(config_path)
    }
}

fn run_human(config_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), config_path);

    let text = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path))?;

    match validate_config_str(&text) {
        Ok(config) => {
            let fingerprint = config_fingerprint(&config)?;
            println!(
                "{} {} shape key(s), {} model(s)",
                "Config:".dimmed(),
                config.shape_keys.len(),
                config.model_info.as_ref().map_or(0, Vec::len)
            );
            println!(
                "{} {}",
                "Fingerprint:".dimmed(),
                reporting::short_hash(&fingerprint)
            );
            println!("\n{} Config is valid", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(issues) => {
            reporting::print_issues(&issues);
            println!(
                "\n{} Config has {} error(s)",
                "FAILED".red().bold(),
                issues.len()
            );
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(config_path: &str) -> Result<ExitCode> {
    let output = match std::fs::read_to_string(config_path) {
        Err(e) => ValidateOutput {
            success: false,
            errors: vec![JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read config file {}: {}", config_path, e),
            )],
            fingerprint: None,
        },
        Ok(text) => match validate_config_str(&text) {
            Ok(config) => ValidateOutput {
                success: true,
                errors: vec![],
                fingerprint: Some(config_fingerprint(&config)?),
            },
            Err(issues) => ValidateOutput {
                success: false,
                errors: issues.iter().map(validation_error_to_json).collect(),
                fingerprint: None,
            },
        },
    };

    print_json(&output)?;
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
