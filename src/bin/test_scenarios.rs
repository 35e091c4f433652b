//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios                  # Run all scenarios
//!   cargo run --bin test-scenarios -- aim/          # Run category
//!   cargo run --bin test-scenarios -- swing/driver  # Run single scenario
//!   cargo run --bin test-scenarios -- --verbose     # Show setup and full failures

use std::path::Path;

use minigolf::testing::{
    SCENARIOS_DIR, ScenarioDefinition, ScenarioResult, discover_scenarios, parse_scenario_file,
    run_scenario,
};

#[derive(Default)]
struct Tally {
    passed: u32,
    failed: u32,
    errors: u32,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let filter = args.iter().find(|a| !a.starts_with('-')).map(String::as_str);

    let root = Path::new(SCENARIOS_DIR);
    let files = discover_scenarios(root, filter);
    if files.is_empty() {
        match filter {
            Some(f) => println!("No scenarios under {} match '{}'", SCENARIOS_DIR, f),
            None => println!("No scenarios found under {}", SCENARIOS_DIR),
        }
        std::process::exit(1);
    }

    println!("Minigolf scenarios ({})\n", files.len());

    let mut tally = Tally::default();
    let mut category = String::new();
    for path in &files {
        let rel = path.strip_prefix(root).unwrap_or(path);
        let dir = rel.parent().map(|p| p.to_string_lossy().to_string()).unwrap_or_default();
        if dir != category {
            println!("{}/", dir);
            category = dir;
        }
        let name = rel
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let scenario = match parse_scenario_file(path) {
            Ok(scenario) => scenario,
            Err(message) => {
                tally.errors += 1;
                println!("  {:<32} ERROR\n    {}", name, message);
                continue;
            }
        };

        match run_scenario(&scenario) {
            ScenarioResult::Pass { frames } => {
                tally.passed += 1;
                println!("  {:<32} ok ({} frames)", name, frames);
                if verbose {
                    println!("    {}", describe_setup(&scenario));
                }
            }
            ScenarioResult::Fail { error, frame, state } => {
                tally.failed += 1;
                println!("  {:<32} FAIL at frame {}", name, frame);
                println!("    {}", describe_setup(&scenario));
                println!("    {}", state.summary());
                if verbose {
                    println!("    {}", error);
                } else {
                    println!("    {}", error.message);
                }
            }
            ScenarioResult::Error { message } => {
                tally.errors += 1;
                println!("  {:<32} ERROR\n    {}", name, message);
            }
        }
    }

    println!(
        "\n{} passed, {} failed, {} errors",
        tally.passed, tally.failed, tally.errors
    );
    if tally.failed > 0 || tally.errors > 0 {
        std::process::exit(1);
    }
}

/// Course size, aim mode, club and where swing randomness comes from
fn describe_setup(scenario: &ScenarioDefinition) -> String {
    let setup = &scenario.setup;
    let swing = match setup.strength {
        Some(strength) => format!("strength {} deviation {}", strength, setup.deviation),
        None => format!("random swing, seed {}", setup.seed.unwrap_or(0)),
    };
    let mut line = format!(
        "{}x{} {:?} aim, {}, {}",
        setup.width, setup.height, setup.aim, setup.club, swing
    );
    if !setup.motion.samples.is_empty() {
        line.push_str(&format!(", {} motion sample(s)", setup.motion.samples.len()));
    }
    if let Some(description) = &scenario.description {
        line.push_str(&format!("\n    {}", description));
    }
    line
}
