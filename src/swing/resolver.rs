//! Shot resolution: base angle + swing sample + club -> target point

use bevy::math::DVec2;

use super::{SampleOrigin, SwingSample};

/// Everything decided about one shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotResolution {
    pub origin: DVec2,
    pub target: DVec2,
    /// Intended angle plus deviation, degrees
    pub final_angle: f64,
    /// Strength after the club multiplier
    pub strength: f64,
    pub deviation: f64,
    pub distance: f64,
    pub sample_origin: SampleOrigin,
}

/// Resolve where the ball ends up.
///
/// Canvas y grows downward, so a positive angle moves the target up
/// (negative y). Targets are not clamped to the playfield.
pub fn resolve_shot(
    origin: DVec2,
    base_angle: f64,
    club_multiplier: f64,
    sample: SwingSample,
    distance_scale: f64,
    sample_origin: SampleOrigin,
) -> ShotResolution {
    let strength = sample.strength * club_multiplier;
    let final_angle = base_angle + sample.deviation;
    let rad = final_angle.to_radians();
    let distance = strength * distance_scale;
    let target = DVec2::new(
        origin.x + distance * rad.cos(),
        origin.y - distance * rad.sin(),
    );

    ShotResolution {
        origin,
        target,
        final_angle,
        strength,
        deviation: sample.deviation,
        distance,
        sample_origin,
    }
}
