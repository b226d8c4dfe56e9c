//! Fitroom CLI - Command-line interface for avatar shape keys
//!
//! This binary inspects scenes, validates configs, and exports or re-applies
//! shape-key configs without a browser.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Use modules from the library crate
use fitroom_cli::commands;
use fitroom_cli::commands::export::ExportOptions;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FITROOM_LOG";

/// Fitroom - Avatar Shape-Key Playground
#[derive(Parser)]
#[command(name = "fitroom")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a scene and list its sliders by panel
    Inspect {
        /// Path to the scene manifest (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a config file without a scene
    Validate {
        /// Path to the config file
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Build an avatar and write its config
    Export {
        /// Path to the scene manifest (JSON)
        #[arg(short, long)]
        scene: String,

        /// Config to apply before the overrides
        #[arg(short, long)]
        config: Option<String>,

        /// Slider override as name=value (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE", allow_hyphen_values = true)]
        set: Vec<String>,

        /// Model to hide (repeatable)
        #[arg(long)]
        hide: Vec<String>,

        /// Model to show (repeatable)
        #[arg(long)]
        show: Vec<String>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Export settings file (JSON)
        #[arg(long)]
        settings: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Import a config into a scene and print the influences
    Apply {
        /// Path to the scene manifest (JSON)
        #[arg(short, long)]
        scene: String,

        /// Path to the config file
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { scene, json } => commands::inspect::run(&scene, json),
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Export {
            scene,
            config,
            set,
            hide,
            show,
            out_dir,
            settings,
            json,
        } => commands::export::run(
            &ExportOptions {
                scene,
                config,
                set,
                hide,
                show,
                out_dir,
                settings,
            },
            json,
        ),
        Commands::Apply {
            scene,
            config,
            json,
        } => commands::apply::run(&scene, &config, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_export_overrides() {
        let cli = Cli::try_parse_from([
            "fitroom",
            "export",
            "--scene",
            "scene.json",
            "--set",
            "waist=-0.3",
            "--set",
            "height=0.5",
            "--hide",
            "skirt",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                scene,
                set,
                hide,
                show,
                json,
                ..
            } => {
                assert_eq!(scene, "scene.json");
                assert_eq!(set, vec!["waist=-0.3", "height=0.5"]);
                assert_eq!(hide, vec!["skirt"]);
                assert!(show.is_empty());
                assert!(json);
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_parses_apply() {
        let cli =
            Cli::try_parse_from(["fitroom", "apply", "-s", "scene.json", "-c", "avatar.json"])
                .unwrap();
        match cli.command {
            Commands::Apply {
                scene,
                config,
                json,
            } => {
                assert_eq!(scene, "scene.json");
                assert_eq!(config, "avatar.json");
                assert!(!json);
            }
            _ => panic!("expected apply command"),
        }
    }

    #[test]
    fn test_cli_requires_scene() {
        assert!(Cli::try_parse_from(["fitroom", "inspect"]).is_err());
    }
}
