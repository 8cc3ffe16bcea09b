//! Deterministic 2D coherent noise fields.
//!
//! A [`NoiseField`] samples Perlin gradient noise at `(x + seed, y + seed)`
//! scaled by a frequency and remaps it to `[0, 1)`. Every field in a world
//! shares the same permutation table; the world seed enters purely as a
//! coordinate offset, so two fields with the same `(seed, frequency,
//! threshold)` are interchangeable.

use ::noise::{NoiseFn, Perlin};

/// Seed of the shared Perlin permutation table.
pub const PERMUTATION_SEED: u32 = 0;

/// Threshold used by [`NoiseField::new`] when none is given.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Largest value [`NoiseField::sample`] can return.
const SAMPLE_MAX: f64 = 1.0 - f64::EPSILON;

/// Immutable coherent noise sampler with an attached mask threshold.
#[derive(Clone)]
pub struct NoiseField {
    /// Coordinate offset derived from the world seed.
    seed: f64,
    /// Input scale.
    frequency: f64,
    /// `mask` is true strictly above this value.
    threshold: f64,
    /// Gradient noise source.
    source: Perlin,
}

impl NoiseField {
    /// Creates a field with the default threshold.
    #[must_use]
    pub fn new(seed: f64, frequency: f64) -> Self {
        Self {
            seed,
            frequency,
            threshold: DEFAULT_THRESHOLD,
            source: Perlin::new(PERMUTATION_SEED),
        }
    }

    /// Creates a field whose mask uses `threshold`.
    #[must_use]
    pub fn with_threshold(seed: f64, frequency: f64, threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::new(seed, frequency)
        }
    }

    /// Returns the seed offset.
    #[must_use]
    pub const fn seed(&self) -> f64 {
        self.seed
    }

    /// Returns the frequency.
    #[must_use]
    pub const fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Returns the mask threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Samples the field at an integer cell. Always in `[0, 1)`.
    #[must_use]
    pub fn sample(&self, x: i32, y: i32) -> f64 {
        self.sample_f64(f64::from(x), f64::from(y))
    }

    /// Samples the field at a continuous position. Always in `[0, 1)`.
    #[must_use]
    pub fn sample_f64(&self, x: f64, y: f64) -> f64 {
        let point = [
            (x + self.seed) * self.frequency,
            (y + self.seed) * self.frequency,
        ];
        let raw = self.source.get(point);
        ((raw + 1.0) * 0.5).clamp(0.0, SAMPLE_MAX)
    }

    /// `sample(x, y) > threshold`.
    #[must_use]
    pub fn mask(&self, x: i32, y: i32) -> bool {
        self.sample(x, y) > self.threshold
    }
}

impl PartialEq for NoiseField {
    fn eq(&self, other: &Self) -> bool {
        self.seed.to_bits() == other.seed.to_bits()
            && self.frequency.to_bits() == other.frequency.to_bits()
            && self.threshold.to_bits() == other.threshold.to_bits()
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .field("frequency", &self.frequency)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sample_matches_closed_form() {
        let field = NoiseField::new(-1234.0, 0.05);
        let perlin = Perlin::new(PERMUTATION_SEED);

        let raw = perlin.get([(100.0 - 1234.0) * 0.05, (0.0 - 1234.0) * 0.05]);
        let expected = ((raw + 1.0) * 0.5).clamp(0.0, SAMPLE_MAX);

        assert!((field.sample(100, 0) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_identical_parameters_are_equal() {
        let a = NoiseField::with_threshold(7.5, 0.1, 0.3);
        let b = NoiseField::with_threshold(7.5, 0.1, 0.3);
        assert_eq!(a, b);

        for x in 0..50 {
            for y in 0..50 {
                assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
                assert_eq!(a.mask(x, y), b.mask(x, y));
            }
        }

        assert_ne!(a, NoiseField::with_threshold(7.5, 0.1, 0.4));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseField::new(10.3, 0.07);
        let b = NoiseField::new(4321.9, 0.07);
        let differing = (0..100).filter(|&x| a.sample(x, 3) != b.sample(x, 3)).count();
        assert!(differing > 50);
    }

    #[test]
    fn test_mask_is_strictly_above_threshold() {
        let field = NoiseField::with_threshold(55.5, 0.08, 0.5);
        for x in 0..64 {
            for y in 0..64 {
                assert_eq!(field.mask(x, y), field.sample(x, y) > 0.5);
            }
        }
    }

    #[test]
    fn test_threshold_extremes() {
        let always = NoiseField::with_threshold(3.3, 0.05, -1.0);
        let never = NoiseField::with_threshold(3.3, 0.05, 1.0);
        for x in 0..32 {
            assert!(always.mask(x, x));
            assert!(!never.mask(x, x));
        }
    }

    #[test]
    fn test_field_is_smooth() {
        let field = NoiseField::new(0.37, 0.05);
        for x in 0..200 {
            let step = (field.sample(x, 9) - field.sample(x + 1, 9)).abs();
            assert!(step < 0.2, "jump of {step} between columns {x} and {}", x + 1);
        }
    }

    #[test]
    fn test_field_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoiseField>();
    }

    proptest! {
        #[test]
        fn prop_sample_in_unit_range(
            seed in -10_000.0f64..10_000.0,
            frequency in 0.0001f64..2.0,
            x in -5_000i32..5_000,
            y in -5_000i32..5_000,
        ) {
            let value = NoiseField::new(seed, frequency).sample(x, y);
            prop_assert!((0.0..1.0).contains(&value));
        }

        #[test]
        fn prop_sample_is_deterministic(seed in -10_000.0f64..10_000.0, x in 0i32..500, y in 0i32..500) {
            let field = NoiseField::new(seed, 0.05);
            prop_assert_eq!(field.sample(x, y).to_bits(), field.sample(x, y).to_bits());
        }
    }
}
