//! Shot Dispersion Tool - resolve simulated swings without a window
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --shots 5000 --seed 42
//!   cargo run --bin simulate -- --clubs driver,putter --angle 30 --json

use minigolf::settings::CliError;
use minigolf::simulation::{SimConfig, run_simulation};

fn main() {
    let config = match SimConfig::from_args() {
        Ok(config) => config,
        Err(err) => {
            match &err {
                CliError::Help(text) => println!("{}", text),
                CliError::Invalid(message) => eprintln!("{}", message),
            }
            std::process::exit(err.exit_code());
        }
    };

    if let Err(e) = run_simulation(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
