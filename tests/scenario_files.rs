//! Runs every TOML scenario under tests/scenarios

use std::path::Path;

use minigolf::testing::{ScenarioResult, discover_scenarios, parse_scenario_file, run_scenario};

#[test]
fn all_scenarios_pass() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scenarios");
    let files = discover_scenarios(&root, None);
    assert!(!files.is_empty(), "no scenarios found in {}", root.display());

    let mut failures = Vec::new();
    for path in &files {
        let result = match parse_scenario_file(path) {
            Ok(scenario) => run_scenario(&scenario),
            Err(message) => ScenarioResult::Error { message },
        };
        match result {
            ScenarioResult::Pass { .. } => {}
            ScenarioResult::Fail { error, frame, state } => failures.push(format!(
                "{} (frame {}, {}): {}",
                path.display(),
                frame,
                state.summary(),
                error
            )),
            ScenarioResult::Error { message } => failures.push(format!("{}: {}", path.display(), message)),
        }
    }

    assert!(failures.is_empty(), "{} scenario(s) failed:\n{}", failures.len(), failures.join("\n"));
}
