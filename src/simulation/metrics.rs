//! Per-shot records and dispersion statistics

use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

use crate::clubs::Club;
use crate::swing::ShotResolution;

/// One simulated shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub club: Club,
    pub seed: u64,
    pub strength: f64,
    pub deviation: f64,
    pub distance: f64,
    /// Travel along the intended direction
    pub carry: f64,
    /// Signed offset from the aim line, positive = counter-clockwise of the aim
    pub lateral: f64,
}

impl ShotRecord {
    pub fn from_shot(club: Club, seed: u64, base_angle: f64, shot: &ShotResolution) -> Self {
        let (carry, lateral) = aim_relative(shot.origin, shot.target, base_angle);
        Self {
            club,
            seed,
            strength: shot.strength,
            deviation: shot.deviation,
            distance: shot.distance,
            carry,
            lateral,
        }
    }
}

/// Split a canvas displacement into (along aim, across aim).
/// Canvas y grows downward, so y is flipped before projecting.
pub fn aim_relative(origin: DVec2, target: DVec2, base_angle: f64) -> (f64, f64) {
    let rad = base_angle.to_radians();
    let aim = DVec2::new(rad.cos(), rad.sin());
    let offset = DVec2::new(target.x - origin.x, origin.y - target.y);
    (aim.dot(offset), aim.perp_dot(offset))
}

/// Aggregate dispersion for one club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionStats {
    pub club: Club,
    pub shots: usize,
    pub mean_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub std_dev_distance: f64,
    pub mean_lateral: f64,
    /// Largest absolute offset from the aim line
    pub max_lateral: f64,
}

impl DispersionStats {
    /// None when there are no shots for the club
    pub fn from_records(club: Club, records: &[ShotRecord]) -> Option<Self> {
        let shots: Vec<&ShotRecord> = records.iter().filter(|r| r.club == club).collect();
        if shots.is_empty() {
            return None;
        }
        let n = shots.len() as f64;

        let mean_distance = shots.iter().map(|r| r.distance).sum::<f64>() / n;
        let variance = shots
            .iter()
            .map(|r| (r.distance - mean_distance).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            club,
            shots: shots.len(),
            mean_distance,
            min_distance: shots.iter().map(|r| r.distance).fold(f64::INFINITY, f64::min),
            max_distance: shots.iter().map(|r| r.distance).fold(f64::NEG_INFINITY, f64::max),
            std_dev_distance: variance.sqrt(),
            mean_lateral: shots.iter().map(|r| r.lateral).sum::<f64>() / n,
            max_lateral: shots.iter().map(|r| r.lateral.abs()).fold(0.0, f64::max),
        })
    }
}

/// Result of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispersionReport {
    pub base_seed: u64,
    pub base_angle: f64,
    pub shots_per_club: u32,
    pub clubs: Vec<DispersionStats>,
}

impl DispersionReport {
    /// Fixed-width table, one row per club
    pub fn format_table(&self) -> String {
        let mut out = format!(
            "Dispersion: {} shots/club, angle {:.1}, seed {}\n",
            self.shots_per_club, self.base_angle, self.base_seed
        );
        out.push_str(&format!(
            "{:<8} {:>6} {:>9} {:>9} {:>9} {:>8} {:>9} {:>9}\n",
            "club", "shots", "mean", "min", "max", "std", "lat.mean", "lat.max"
        ));
        for stats in &self.clubs {
            out.push_str(&format!(
                "{:<8} {:>6} {:>9.1} {:>9.1} {:>9.1} {:>8.1} {:>9.2} {:>9.2}\n",
                stats.club.name(),
                stats.shots,
                stats.mean_distance,
                stats.min_distance,
                stats.max_distance,
                stats.std_dev_distance,
                stats.mean_lateral,
                stats.max_lateral,
            ));
        }
        out
    }
}
