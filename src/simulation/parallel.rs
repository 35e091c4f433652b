//! Parallel shot resolution
//!
//! Uses Rayon to resolve many independent shots concurrently. Each shot
//! owns its sampler, seeded from the base seed and its index.

use bevy::math::DVec2;
use rayon::prelude::*;

use crate::clubs::Club;
use crate::settings::GolfSettings;
use crate::swing::{RandomSampler, SampleOrigin, SwingSampler, resolve_shot};

use super::metrics::ShotRecord;

/// Initialize the global Rayon pool with the given thread count.
/// Call this once at startup; 0 keeps Rayon's default.
pub fn init_parallel(threads: usize) -> Result<(), String> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to initialize Rayon thread pool: {}", e))?;
    }
    Ok(())
}

/// Seed for the nth shot of a batch
pub fn shot_seed(base_seed: u64, index: u64) -> u64 {
    base_seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// One shot in a parallel batch
#[derive(Debug, Clone, Copy)]
pub struct ShotConfig {
    pub club: Club,
    pub seed: u64,
}

/// Every (club, shot) pair with its own seed
pub fn build_batch(clubs: &[Club], shots_per_club: u32, base_seed: u64) -> Vec<ShotConfig> {
    let mut batch = Vec::with_capacity(clubs.len() * shots_per_club as usize);
    let mut index = 0u64;
    for &club in clubs {
        for _ in 0..shots_per_club {
            batch.push(ShotConfig {
                club,
                seed: shot_seed(base_seed, index),
            });
            index += 1;
        }
    }
    batch
}

/// Resolve a single simulated shot from the origin
pub fn run_shot(config: &ShotConfig, base_angle: f64, origin: DVec2, settings: &GolfSettings) -> ShotRecord {
    let mut sampler =
        RandomSampler::seeded(config.seed).with_ranges(settings.strength_range, settings.deviation_range);
    let shot = resolve_shot(
        origin,
        base_angle,
        settings.clubs.get(config.club),
        sampler.sample(),
        settings.distance_scale,
        SampleOrigin::Simulated,
    );
    ShotRecord::from_shot(config.club, config.seed, base_angle, &shot)
}

/// Resolve a batch in parallel. Results keep the batch order.
pub fn run_shots_parallel(
    batch: &[ShotConfig],
    base_angle: f64,
    origin: DVec2,
    settings: &GolfSettings,
) -> Vec<ShotRecord> {
    batch
        .par_iter()
        .map(|cfg| run_shot(cfg, base_angle, origin, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_layout() {
        let batch = build_batch(&[Club::Driver, Club::Putter], 3, 42);
        assert_eq!(batch.len(), 6);
        assert!(batch[..3].iter().all(|s| s.club == Club::Driver));
        assert!(batch[3..].iter().all(|s| s.club == Club::Putter));
        assert_eq!(batch[0].seed, 42);
        assert_ne!(batch[1].seed, batch[2].seed);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let settings = GolfSettings::default();
        let batch = build_batch(&Club::ALL, 25, 7);
        let origin = DVec2::new(50.0, 550.0);

        let parallel = run_shots_parallel(&batch, 30.0, origin, &settings);
        let sequential: Vec<ShotRecord> =
            batch.iter().map(|cfg| run_shot(cfg, 30.0, origin, &settings)).collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_distances_within_club_range() {
        let settings = GolfSettings::default();
        let batch = build_batch(&[Club::Putter], 200, 1);
        for record in run_shots_parallel(&batch, 0.0, DVec2::ZERO, &settings) {
            // Putter 0.5 x strength [5, 20) x scale 10
            assert!(record.distance >= 25.0 && record.distance < 100.0);
            assert!(record.deviation >= -5.0 && record.deviation < 5.0);
        }
    }
}
