//! Scenario loading from TOML files

use crate::format::ScenarioFile;
use std::fs;
use std::path::Path;
use trackline_core::Result;

/// Load a scenario from a TOML file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioFile> {
    let content = fs::read_to_string(path)?;
    load_scenario_string(&content)
}

/// Load a scenario from a TOML string
pub fn load_scenario_string(content: &str) -> Result<ScenarioFile> {
    let file: ScenarioFile = toml::from_str(content)?;
    Ok(file)
}
