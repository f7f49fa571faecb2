//! Print the geometry of a scenario

use anyhow::{Context, Result};
use trackline_scenario::{build_track, load_scenario};

pub fn run(path: &str, samples: usize) -> Result<()> {
    let file = load_scenario(path).with_context(|| format!("Failed to read '{}'", path))?;
    let track = build_track(&file).with_context(|| format!("Invalid scenario '{}'", path))?;

    println!("Scenario: {}", track.name);
    println!("Model: {}", track.model);
    println!("Home: {}", track.curves.name(track.home).unwrap_or("?"));

    println!("\nPaths:");
    for (_, name, curve) in track.curves.iter() {
        println!(
            "  {} ({}, {} waypoints, length {:.1})",
            name,
            if curve.is_looping() { "looping" } else { "open" },
            curve.waypoints().len(),
            curve.length()
        );
        for sample in curve.sample(samples) {
            println!(
                "    t={:.3}  pos=({:.1}, {:.1}, {:.1})  dir=({:.2}, {:.2}, {:.2})",
                sample.t,
                sample.position.x,
                sample.position.y,
                sample.position.z,
                sample.tangent.x,
                sample.tangent.y,
                sample.tangent.z
            );
        }
    }

    if !track.junctions.is_empty() {
        println!("\nJunctions:");
        for (_, junction) in track.junctions.iter() {
            let p = junction.position;
            println!(
                "  {} at ({:.1}, {:.1}, {:.1}) within {:.1}",
                junction.name, p.x, p.y, p.z, junction.tolerance
            );
            for trigger in junction.triggers() {
                let target = junction
                    .branch(trigger)
                    .and_then(|id| track.curves.name(id))
                    .unwrap_or("?");
                println!("    {} -> {}", trigger, target);
            }
        }
    }

    Ok(())
}
