//! Dispersion run configuration

use serde::{Deserialize, Serialize};

use crate::clubs::Club;
use crate::settings::{CliError, config_path_from_args};

/// Configuration for a dispersion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Shots per club
    pub shots: u32,
    /// Clubs to test (empty = all clubs)
    pub clubs: Vec<Club>,
    /// Intended angle for every shot, degrees
    pub base_angle: f64,
    /// RNG seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Number of parallel threads (0 = Rayon default)
    pub parallel: usize,
    /// Print the report as JSON instead of a table
    pub json: bool,
    /// Output file path (None = stdout)
    pub output_file: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
    /// Settings file for multipliers and sampling ranges
    pub settings_path: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            shots: 1000,
            clubs: Vec::new(),
            base_angle: 0.0,
            seed: None,
            parallel: 0,
            json: false,
            output_file: None,
            quiet: false,
            settings_path: crate::settings::SETTINGS_FILE.to_string(),
        }
    }
}

impl SimConfig {
    /// Clubs the run covers
    pub fn clubs(&self) -> Vec<Club> {
        if self.clubs.is_empty() {
            Club::ALL.to_vec()
        } else {
            self.clubs.clone()
        }
    }

    /// Parse configuration from command line arguments
    pub fn from_arg_list(args: &[String]) -> Result<Self, CliError> {
        let mut config = Self {
            settings_path: config_path_from_args(args).display().to_string(),
            ..Self::default()
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    // Already handled above
                    i += 1;
                }
                "--shots" | "-n" => {
                    if let Some(val) = args.get(i + 1) {
                        config.shots = val
                            .parse()
                            .map_err(|_| CliError::Invalid(format!("Invalid shot count '{}'", val)))?;
                        i += 1;
                    }
                }
                "--clubs" => {
                    if let Some(val) = args.get(i + 1) {
                        // Comma-separated list of clubs
                        config.clubs = val
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(|s| {
                                Club::from_name(s)
                                    .ok_or_else(|| CliError::Invalid(format!("Unknown club '{}'", s)))
                            })
                            .collect::<Result<_, _>>()?;
                        i += 1;
                    }
                }
                "--angle" => {
                    if let Some(val) = args.get(i + 1) {
                        config.base_angle = val
                            .parse()
                            .map_err(|_| CliError::Invalid(format!("Invalid angle '{}'", val)))?;
                        i += 1;
                    }
                }
                "--seed" => {
                    if let Some(val) = args.get(i + 1) {
                        config.seed = val.parse().ok();
                        i += 1;
                    }
                }
                "--parallel" => {
                    if let Some(val) = args.get(i + 1) {
                        config.parallel = val.parse().unwrap_or(0);
                        i += 1;
                    }
                }
                "--output" | "-o" => {
                    if let Some(val) = args.get(i + 1) {
                        config.output_file = Some(val.clone());
                        i += 1;
                    }
                }
                "--json" => config.json = true,
                "--quiet" | "-q" => config.quiet = true,
                "--help" | "-h" => return Err(CliError::Help(help_text())),
                other => eprintln!("Warning: ignoring unknown argument '{}'", other),
            }
            i += 1;
        }
        Ok(config)
    }

    /// Parse from the process arguments
    pub fn from_args() -> Result<Self, CliError> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_arg_list(&args)
    }
}

fn help_text() -> String {
    r#"Shot dispersion simulator - resolve many simulated swings per club

USAGE:
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    -n, --shots N         Shots per club (default: 1000)
    --clubs LIST          Comma-separated clubs (default: all)
    --angle DEG           Intended shot angle (default: 0)
    --seed N              Base RNG seed (default: random)
    --parallel N          Worker threads (default: auto)
    --config PATH         Settings file for multipliers and ranges
    --json                Print JSON instead of a table
    -o, --output PATH     Write the report to a file
    -q, --quiet           No progress output
    -h, --help            Show this help"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("simulate")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_overrides() {
        let config =
            SimConfig::from_arg_list(&args(&["--shots", "50", "--clubs", "putter, Iron", "--seed", "7", "--json"]))
                .unwrap();
        assert_eq!(config.shots, 50);
        assert_eq!(config.clubs, vec![Club::Putter, Club::Iron]);
        assert_eq!(config.seed, Some(7));
        assert!(config.json);
    }

    #[test]
    fn test_unknown_club_is_error() {
        let err = SimConfig::from_arg_list(&args(&["--clubs", "wedge"])).unwrap_err();
        assert!(matches!(err, CliError::Invalid(_)));
    }

    #[test]
    fn test_help_exits_cleanly() {
        let err = SimConfig::from_arg_list(&args(&["--shots", "5", "--help"])).unwrap_err();
        assert!(matches!(&err, CliError::Help(text) if text.contains("USAGE")));
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_default_covers_all_clubs() {
        assert_eq!(SimConfig::default().clubs(), Club::ALL.to_vec());
    }
}
