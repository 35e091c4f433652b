//! Dispersion run driver

use bevy::prelude::*;
use rand::Rng;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::course::Course;
use crate::settings::GolfSettings;

use super::config::SimConfig;
use super::metrics::{DispersionReport, DispersionStats};
use super::parallel::{build_batch, init_parallel, run_shots_parallel};

/// Resolve every shot and aggregate per club
pub fn run_dispersion(config: &SimConfig, settings: &GolfSettings) -> DispersionReport {
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let clubs = config.clubs();
    let origin = Course::for_window(
        settings.window_width as f64,
        settings.window_height as f64,
        settings.canvas_width_fraction,
        settings.canvas_height_fraction,
    )
    .ball
    .position;

    let batch = build_batch(&clubs, config.shots, base_seed);
    let records = run_shots_parallel(&batch, config.base_angle, origin, settings);

    DispersionReport {
        base_seed,
        base_angle: config.base_angle,
        shots_per_club: config.shots,
        clubs: clubs
            .iter()
            .filter_map(|&club| DispersionStats::from_records(club, &records))
            .collect(),
    }
}

/// Run from the command line config: progress on stderr, report on stdout or a file
pub fn run_simulation(config: SimConfig) -> Result<(), String> {
    init_parallel(config.parallel)?;
    let settings = GolfSettings::load_from(Path::new(&config.settings_path));

    if !config.quiet {
        eprintln!(
            "Resolving {} shots for {} club(s)...",
            config.shots as usize * config.clubs().len(),
            config.clubs().len()
        );
    }
    let start = Instant::now();
    let report = run_dispersion(&config, &settings);
    if !config.quiet {
        eprintln!("Done in {:.2?}", start.elapsed());
    }
    info!("Dispersion run finished with seed {}", report.base_seed);

    let output = if config.json {
        serde_json::to_string_pretty(&report).map_err(|e| format!("Failed to serialize report: {}", e))?
    } else {
        report.format_table()
    };

    match &config.output_file {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                fs::create_dir_all(parent).map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
            let mut file = File::create(path).map_err(|e| format!("Failed to create {}: {}", path, e))?;
            writeln!(file, "{}", output).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            if !config.quiet {
                eprintln!("Wrote {}", path);
            }
        }
        None => println!("{}", output),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clubs::Club;

    #[test]
    fn test_seeded_run_is_reproducible() {
        let config = SimConfig {
            shots: 40,
            seed: Some(99),
            ..Default::default()
        };
        let settings = GolfSettings::default();
        let a = run_dispersion(&config, &settings);
        let b = run_dispersion(&config, &settings);
        assert_eq!(a.clubs, b.clubs);
        assert_eq!(a.clubs.len(), 4);
    }

    #[test]
    fn test_driver_outdrives_putter() {
        let config = SimConfig {
            shots: 200,
            clubs: vec![Club::Driver, Club::Putter],
            seed: Some(3),
            ..Default::default()
        };
        let report = run_dispersion(&config, &GolfSettings::default());
        assert!(report.clubs[0].mean_distance > report.clubs[1].mean_distance);
        assert!(report.format_table().contains("putter"));
    }
}
