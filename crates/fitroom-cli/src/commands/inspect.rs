//! Inspect command implementation
//!
//! Loads a scene and lists the sliders it produces, panel by panel.

use anyhow::Result;
use colored::Colorize;
use fitroom_core::{Category, ExportSettings};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{print_json, scene_error_to_json, InspectOutput, SliderJson};
use crate::scene::build_playground;

/// Run the inspect command
///
/// # Arguments
/// * `scene_path` - Path to the scene manifest
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the scene loaded, 1 otherwise
pub fn run(scene_path: &str, json_output: bool) -> Result<ExitCode> {
    let loaded = build_playground(Path::new(scene_path), ExportSettings::default());

    if json_output {
        let output = match &loaded {
            Ok(playground) => InspectOutput {
                success: true,
                errors: vec![],
                models: playground.visibility().resolved(),
                sliders: playground
                    .grouped_shape_keys()
                    .iter()
                    .map(|g| SliderJson::from_group(playground, g))
                    .collect(),
            },
            Err(e) => InspectOutput {
                success: false,
                errors: vec![scene_error_to_json(e)],
                models: vec![],
                sliders: vec![],
            },
        };
        print_json(&output)?;
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    println!("{} {}", "Inspecting:".cyan().bold(), scene_path);
    let playground = loaded?;

    println!(
        "{} {} mesh(es), {} shape key(s), {} entr(ies)",
        "Scene:".dimmed(),
        playground.arena().len(),
        playground.registry().len(),
        playground.registry().entry_count()
    );

    println!("\n{}", "Models:".cyan().bold());
    for model in playground.visibility().resolved() {
        let state = if model.visible {
            "visible".green()
        } else {
            "hidden".dimmed()
        };
        println!("  {} {}", model.name, state);
    }

    let panels = playground.categorized_shape_keys();
    for &category in Category::all() {
        let groups = panels.get(category);
        if groups.is_empty() {
            continue;
        }
        println!("\n{} ({})", category.as_str().cyan().bold(), groups.len());
        for group in groups {
            let (min, max) = group.range();
            let kind = if group.is_combined() {
                "combined".yellow()
            } else {
                "single".normal()
            };
            println!(
                "  {} {} [{}] {} [{:+.1}, {:+.1}]",
                group.label().bold(),
                kind,
                group.keys().join(" / "),
                format!("{} entr(ies)", group.entry_count()).dimmed(),
                min,
                max
            );
        }
    }

    if playground.grouped_shape_keys().is_empty() {
        println!("\n{} no shape keys found", "!".yellow());
    }

    Ok(ExitCode::SUCCESS)
}
