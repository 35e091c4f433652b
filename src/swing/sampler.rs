//! Strength and deviation sources for a swing

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::*;
use crate::motion::MotionSample;

/// Raw swing strength and angular deviation (degrees), before the club multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingSample {
    pub strength: f64,
    pub deviation: f64,
}

impl SwingSample {
    pub fn new(strength: f64, deviation: f64) -> Self {
        Self { strength, deviation }
    }
}

/// Where a swing's strength and deviation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOrigin {
    Motion,
    Simulated,
}

impl std::fmt::Display for SampleOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleOrigin::Motion => write!(f, "motion"),
            SampleOrigin::Simulated => write!(f, "simulated"),
        }
    }
}

/// Simulated swing imprecision
pub trait SwingSampler: Send + Sync {
    fn sample(&mut self) -> SwingSample;
}

/// Uniform random strength and deviation
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
    strength_range: (f64, f64),
    deviation_range: (f64, f64),
}

impl RandomSampler {
    /// Entropy-seeded sampler with the default ranges
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible sampler
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            strength_range: (SIM_STRENGTH_MIN, SIM_STRENGTH_MAX),
            deviation_range: (SIM_DEVIATION_MIN, SIM_DEVIATION_MAX),
        }
    }

    /// Override the sampling ranges (half-open, min < max)
    pub fn with_ranges(mut self, strength: (f64, f64), deviation: (f64, f64)) -> Self {
        self.strength_range = strength;
        self.deviation_range = deviation;
        self
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SwingSampler for RandomSampler {
    fn sample(&mut self) -> SwingSample {
        let (s_min, s_max) = self.strength_range;
        let (d_min, d_max) = self.deviation_range;
        SwingSample {
            strength: self.rng.gen_range(s_min..s_max),
            deviation: self.rng.gen_range(d_min..d_max),
        }
    }
}

/// Always the same swing (tests and replays)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSampler(pub SwingSample);

impl FixedSampler {
    pub fn new(strength: f64, deviation: f64) -> Self {
        Self(SwingSample::new(strength, deviation))
    }
}

impl SwingSampler for FixedSampler {
    fn sample(&mut self) -> SwingSample {
        self.0
    }
}

/// Zero and NaN count as "no reading"
fn reading(value: f64) -> Option<f64> {
    (value != 0.0 && !value.is_nan()).then_some(value)
}

/// Strength and deviation from a motion sample
pub fn motion_swing_sample(sample: &MotionSample, default_strength: f64) -> SwingSample {
    SwingSample {
        strength: reading(sample.acceleration_x)
            .map(f64::abs)
            .unwrap_or(default_strength),
        deviation: reading(sample.acceleration_y).unwrap_or(0.0),
    }
}

/// Pick the swing sample for a shot. The sampler is consulted only
/// when no motion sample is present.
pub fn swing_sample(
    motion: Option<&MotionSample>,
    sampler: &mut dyn SwingSampler,
    default_strength: f64,
) -> (SwingSample, SampleOrigin) {
    match motion {
        Some(sample) => (motion_swing_sample(sample, default_strength), SampleOrigin::Motion),
        None => (sampler.sample(), SampleOrigin::Simulated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sampler that counts calls
    struct Counting(u32);

    impl SwingSampler for Counting {
        fn sample(&mut self) -> SwingSample {
            self.0 += 1;
            SwingSample::new(1.0, 1.0)
        }
    }

    #[test]
    fn test_random_sampler_stays_in_range() {
        let mut sampler = RandomSampler::seeded(7);
        for _ in 0..1000 {
            let s = sampler.sample();
            assert!((SIM_STRENGTH_MIN..SIM_STRENGTH_MAX).contains(&s.strength));
            assert!((SIM_DEVIATION_MIN..SIM_DEVIATION_MAX).contains(&s.deviation));
        }
    }

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let mut a = RandomSampler::seeded(42);
        let mut b = RandomSampler::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn test_motion_strength_is_absolute_x() {
        let s = motion_swing_sample(&MotionSample::new(-8.5, 2.0), DEFAULT_MOTION_STRENGTH);
        assert_eq!(s, SwingSample::new(8.5, 2.0));
    }

    #[test]
    fn test_motion_zero_and_nan_fall_back() {
        let s = motion_swing_sample(&MotionSample::new(0.0, f64::NAN), DEFAULT_MOTION_STRENGTH);
        assert_eq!(s, SwingSample::new(DEFAULT_MOTION_STRENGTH, 0.0));
        let s = motion_swing_sample(&MotionSample::new(f64::NAN, 0.0), 3.0);
        assert_eq!(s, SwingSample::new(3.0, 0.0));
    }

    #[test]
    fn test_motion_path_skips_sampler() {
        let mut counting = Counting(0);
        let motion = MotionSample::new(4.0, -1.0);
        let (sample, origin) = swing_sample(Some(&motion), &mut counting, DEFAULT_MOTION_STRENGTH);
        assert_eq!(origin, SampleOrigin::Motion);
        assert_eq!(sample, SwingSample::new(4.0, -1.0));
        assert_eq!(counting.0, 0);

        let (_, origin) = swing_sample(None, &mut counting, DEFAULT_MOTION_STRENGTH);
        assert_eq!(origin, SampleOrigin::Simulated);
        assert_eq!(counting.0, 1);
    }
}
