//! Initial velocity sampling
//!
//! Each axis gets an independent speed drawn from the two-sided band
//! `[-max, -min) ∪ (min, max]`. The dead zone around zero is excluded so the
//! box never creeps along one axis or travels a perfectly axis-aligned path.

use rand::Rng;

use crate::error::ConfigError;

/// Validated `(min_speed, max_speed)` pair, in NDC units per tick
///
/// Holding one of these guarantees `0 < min < max`, which is what makes
/// rejection sampling terminate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRange {
    min: f32,
    max: f32,
}

impl SpeedRange {
    pub fn new(min_speed: f32, max_speed: f32) -> Result<Self, ConfigError> {
        if !(min_speed.is_finite() && min_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed {
                name: "min_speed",
                value: min_speed,
            });
        }
        if !(max_speed.is_finite() && max_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed {
                name: "max_speed",
                value: max_speed,
            });
        }
        if min_speed >= max_speed {
            return Err(ConfigError::InvertedSpeedRange {
                min: min_speed,
                max: max_speed,
            });
        }
        Ok(Self {
            min: min_speed,
            max: max_speed,
        })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Draw one signed axis speed by rejection sampling
    pub fn sample_axis<R: Rng>(&self, rng: &mut R) -> f32 {
        loop {
            let v = rng.random_range(-self.max..=self.max);
            if v < -self.min || v > self.min {
                return v;
            }
        }
    }
}

/// Draw one signed axis speed outside `[-min_speed, min_speed]`.
///
/// Fails fast on a range that would make the rejection loop spin forever.
pub fn sample_axis_velocity<R: Rng>(
    rng: &mut R,
    min_speed: f32,
    max_speed: f32,
) -> Result<f32, ConfigError> {
    Ok(SpeedRange::new(min_speed, max_speed)?.sample_axis(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_SPEED, MIN_SPEED};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn in_band(range: &SpeedRange, v: f32) -> bool {
        v.abs() <= range.max() && (v < -range.min() || v > range.min())
    }

    #[test]
    fn test_reference_range_is_valid() {
        let range = SpeedRange::new(MIN_SPEED, MAX_SPEED).unwrap();
        assert_eq!(range.min(), MIN_SPEED);
        assert_eq!(range.max(), MAX_SPEED);
    }

    #[test]
    fn test_rejects_inverted_and_equal_ranges() {
        assert!(matches!(
            SpeedRange::new(0.002, 0.0014),
            Err(ConfigError::InvertedSpeedRange { .. })
        ));
        assert!(matches!(
            SpeedRange::new(0.002, 0.002),
            Err(ConfigError::InvertedSpeedRange { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        assert!(matches!(
            SpeedRange::new(0.0, 0.002),
            Err(ConfigError::InvalidSpeed { name: "min_speed", .. })
        ));
        assert!(matches!(
            SpeedRange::new(-0.001, 0.002),
            Err(ConfigError::InvalidSpeed { name: "min_speed", .. })
        ));
        assert!(matches!(
            SpeedRange::new(0.001, f32::INFINITY),
            Err(ConfigError::InvalidSpeed { name: "max_speed", .. })
        ));
        assert!(matches!(
            SpeedRange::new(f32::NAN, 0.002),
            Err(ConfigError::InvalidSpeed { name: "min_speed", .. })
        ));
    }

    #[test]
    fn test_free_function_fails_fast_instead_of_looping() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(sample_axis_velocity(&mut rng, 0.5, 0.5).is_err());
        assert!(sample_axis_velocity(&mut rng, 0.9, 0.1).is_err());
    }

    #[test]
    fn test_ten_thousand_samples_avoid_dead_zone() {
        let range = SpeedRange::new(MIN_SPEED, MAX_SPEED).unwrap();
        let mut rng = Pcg32::seed_from_u64(12345);
        for _ in 0..10_000 {
            let v = range.sample_axis(&mut rng);
            assert!(!(v > -MIN_SPEED && v < MIN_SPEED), "dead zone sample {v}");
            assert!((-MAX_SPEED..=MAX_SPEED).contains(&v), "out of range {v}");
        }
    }

    #[test]
    fn test_both_signs_are_drawn() {
        let range = SpeedRange::new(MIN_SPEED, MAX_SPEED).unwrap();
        let mut rng = Pcg32::seed_from_u64(99);
        let samples: Vec<f32> = (0..200).map(|_| range.sample_axis(&mut rng)).collect();
        assert!(samples.iter().any(|v| *v > 0.0));
        assert!(samples.iter().any(|v| *v < 0.0));
    }

    #[test]
    fn test_same_seed_same_samples() {
        let range = SpeedRange::new(MIN_SPEED, MAX_SPEED).unwrap();
        let mut a = Pcg32::seed_from_u64(4242);
        let mut b = Pcg32::seed_from_u64(4242);
        for _ in 0..100 {
            assert_eq!(range.sample_axis(&mut a), range.sample_axis(&mut b));
        }
    }

    proptest! {
        #[test]
        fn prop_samples_stay_in_band(
            min in 0.0001f32..0.5,
            gap in 0.01f32..1.0,
            seed in any::<u64>(),
        ) {
            let max = min + gap;
            let range = SpeedRange::new(min, max).unwrap();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..200 {
                let v = range.sample_axis(&mut rng);
                prop_assert!(in_band(&range, v), "sample {} outside ({}, {}]", v, min, max);
            }
        }
    }
}
