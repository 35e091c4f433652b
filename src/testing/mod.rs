//! Scenario testing system for deterministic game testing
//!
//! Runs scripted pointer, keyboard and swing input against the headless
//! game plugin and checks the resulting state and event sequence.

pub mod assertions;
pub mod parser;
pub mod runner;

use std::fs;
use std::path::{Path, PathBuf};

pub use assertions::{AssertionError, CapturedEvent, WorldState, check_sequence, check_state};
pub use parser::{
    ExpectedEvent, ScenarioDefinition, ScenarioExpectations, ScenarioSetup, StateAssertion, Step,
    parse_scenario, parse_scenario_file,
};
pub use runner::{ScenarioResult, build_scenario_app, capture_world_state, parse_source, run_scenario};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// Every scenario file under `root`, sorted. With a filter, only paths
/// relative to `root` containing it (e.g. "aim/" or "swing/driver").
pub fn discover_scenarios(root: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect_scenarios(root, &mut found);
    if let Some(filter) = filter {
        found.retain(|path| {
            path.strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .contains(filter)
        });
    }
    found.sort();
    found
}

fn collect_scenarios(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_scenarios(&path, out);
        } else if path.extension().is_some_and(|e| e == "toml") {
            out.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_scenarios_filters_by_relative_path() {
        let root = std::env::temp_dir().join(format!("minigolf_scenarios_{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("aim")).unwrap();
        fs::create_dir_all(root.join("swing")).unwrap();
        fs::write(root.join("aim/margin.toml"), "").unwrap();
        fs::write(root.join("swing/driver.toml"), "").unwrap();
        fs::write(root.join("swing/notes.txt"), "").unwrap();

        let all = discover_scenarios(&root, None);
        assert_eq!(all, vec![root.join("aim/margin.toml"), root.join("swing/driver.toml")]);

        let swing = discover_scenarios(&root, Some("swing/"));
        assert_eq!(swing, vec![root.join("swing/driver.toml")]);

        assert!(discover_scenarios(&root.join("missing"), None).is_empty());
        let _ = fs::remove_dir_all(&root);
    }
}
