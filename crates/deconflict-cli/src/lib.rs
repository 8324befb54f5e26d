//! Deconfliction CLI - mission file loading and result reporting.
//!
//! The `deconflict` binary reads a mission JSON file, resolves the safety
//! rules and prints the mission status.

pub mod config;
pub mod report;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use deconflict_core::{DeconflictionRules, MissionPlan};

pub use config::Config;
pub use report::format_report;

/// Read a mission document (`{"drones": [{"id", "waypoints": [...]}]}`).
pub fn load_mission(path: &Path) -> Result<MissionPlan> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read mission file {}", path.display()))?;
    MissionPlan::from_json_str(&text)
        .with_context(|| format!("failed to parse mission file {}", path.display()))
}

/// Read a JSON rules document; missing fields keep their defaults.
pub fn load_rules(path: &Path) -> Result<DeconflictionRules> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse rules file {}", path.display()))
}
