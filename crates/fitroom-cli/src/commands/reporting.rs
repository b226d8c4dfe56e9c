use colored::Colorize;
use fitroom_core::{Playground, ValidationError};

/// Prints validation issues in `CODE: message (at path)` form.
pub(crate) fn print_issues(issues: &[ValidationError]) {
    println!("\n{}", "Errors:".red().bold());
    for issue in issues {
        println!("  {} {}", "x".red(), issue);
    }
}

/// Prints the influence array of every mesh instance.
pub(crate) fn print_influences(playground: &Playground) {
    println!("\n{}", "Influences:".cyan().bold());
    for (id, mesh) in playground.arena().iter() {
        let values: Vec<String> = mesh
            .influences
            .iter()
            .map(|v| format!("{:.3}", v))
            .collect();
        println!(
            "  {} {}/{} [{}]",
            id.to_string().dimmed(),
            mesh.model,
            mesh.name,
            values.join(", ")
        );
    }
}

/// Returns the first characters of a fingerprint for display.
pub(crate) fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(16)]
}
