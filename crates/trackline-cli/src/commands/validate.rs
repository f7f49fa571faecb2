//! Scenario validation command

use anyhow::{Context, Result};
use trackline_scenario::{build_track, load_scenario};

pub fn run(path: &str) -> Result<()> {
    let file = load_scenario(path).with_context(|| format!("Failed to read '{}'", path))?;
    let track = build_track(&file).with_context(|| format!("Invalid scenario '{}'", path))?;

    let warnings = track.warnings();
    if warnings.is_empty() {
        println!(
            "'{}' is valid: {} paths, {} junctions",
            track.name,
            track.curves.len(),
            track.junctions.len()
        );
    } else {
        println!("'{}' is valid with {} warning(s):", track.name, warnings.len());
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }
    Ok(())
}
