//! Lattice noise sources
//!
//! A noise source maps an integer lattice index to a scalar in `[0, 255]`.
//! The hashed source is a pure function of the index; the pregenerated
//! source (see `table`) trades reproducibility for a table lookup.

use crate::error::NoiseError;
use crate::table::PregeneratedNoise;

/// Upper bound of every sample
pub const SAMPLE_MAX: f64 = 255.0;

/// 31-bit mask applied to the index before and after mixing
const HASH_MASK: u64 = 0x7fff_ffff;
/// Left shift of the xor pre-mix
const MIX_SHIFT: u32 = 13;
// Polynomial mix constants: x * (x * x * A + B) + C. They set the hash's
// mixing quality, so any change alters every rendered frame.
const POLY_A: u64 = 15731;
const POLY_B: u64 = 789_221;
const POLY_C: u64 = 1_376_312_589;

/// Anything that can produce a lattice value for an integer index
pub trait NoiseSource {
    /// Sample the lattice at `index`. Result is in `[0, SAMPLE_MAX]`.
    fn sample(&self, index: i64) -> f64;
}

/// Hash an integer lattice index to a value in `[0, 255]`.
///
/// Only the low 31 bits of `index` matter, so inputs congruent mod 2^31
/// give bit-identical results. Arithmetic wraps at 64 bits; the final mask
/// keeps the low 31 bits, which wrapping preserves.
#[inline]
pub fn hashed_value(index: i64) -> f64 {
    let x = (index as u64) & HASH_MASK;
    let mixed = (x << MIX_SHIFT) ^ x;
    let poly = mixed
        .wrapping_mul(mixed.wrapping_mul(mixed).wrapping_mul(POLY_A).wrapping_add(POLY_B))
        .wrapping_add(POLY_C);
    let masked = poly & HASH_MASK;
    SAMPLE_MAX * (masked as f64 / HASH_MASK as f64)
}

/// Stateless hashed noise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashedNoise;

impl NoiseSource for HashedNoise {
    #[inline]
    fn sample(&self, index: i64) -> f64 {
        hashed_value(index)
    }
}

/// The closed set of noise sources a configuration can select
#[derive(Debug)]
pub enum Noise {
    Hashed(HashedNoise),
    Pregenerated(PregeneratedNoise),
}

impl Noise {
    pub fn hashed() -> Self {
        Noise::Hashed(HashedNoise)
    }

    /// Pregenerated table of `size` values. With `seed == None` the table
    /// seed comes from OS entropy and differs between runs.
    pub fn pregenerated(size: usize, seed: Option<u32>) -> Result<Self, NoiseError> {
        PregeneratedNoise::new(size, seed).map(Noise::Pregenerated)
    }

    /// True if the same index always yields the same value across runs
    pub fn is_reproducible(&self) -> bool {
        match self {
            Noise::Hashed(_) => true,
            Noise::Pregenerated(table) => table.is_explicitly_seeded(),
        }
    }
}

impl NoiseSource for Noise {
    #[inline]
    fn sample(&self, index: i64) -> f64 {
        match self {
            Noise::Hashed(n) => n.sample(index),
            Noise::Pregenerated(n) => n.sample(index),
        }
    }
}

impl<T: NoiseSource + ?Sized> NoiseSource for &T {
    #[inline]
    fn sample(&self, index: i64) -> f64 {
        (**self).sample(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashed_known_values() {
        assert!((hashed_value(0) - 163.42835051865706).abs() < 1e-9);
        assert!((hashed_value(1) - 156.36256411269426).abs() < 1e-9);
        assert!((hashed_value(-1) - 12.733898203696077).abs() < 1e-9);
    }

    #[test]
    fn test_hashed_is_pure() {
        for index in [-1_000_000i64, -7, 0, 3, 42, 1 << 20, i64::MAX] {
            let a = hashed_value(index);
            let b = HashedNoise.sample(index);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_hashed_congruent_mod_2_31() {
        let period = 1i64 << 31;
        for index in [0i64, 1, 12345, 999_999, -5] {
            let base = hashed_value(index);
            assert_eq!(base.to_bits(), hashed_value(index + period).to_bits());
            assert_eq!(base.to_bits(), hashed_value(index - 3 * period).to_bits());
        }
        assert_eq!(hashed_value(-1).to_bits(), hashed_value(0x7fff_ffff).to_bits());
    }

    #[test]
    fn test_hashed_range() {
        for index in -5000i64..5000 {
            let v = hashed_value(index * 7919);
            assert!((0.0..=SAMPLE_MAX).contains(&v), "index {index} gave {v}");
        }
    }

    #[test]
    fn test_hashed_varies() {
        let unique: std::collections::HashSet<u64> =
            (0..256).map(|i| hashed_value(i).to_bits()).collect();
        assert!(unique.len() > 200, "hash should spread neighbouring indices");
    }

    #[test]
    fn test_noise_enum_dispatch() {
        let noise = Noise::hashed();
        assert!(noise.is_reproducible());
        assert_eq!(noise.sample(77).to_bits(), hashed_value(77).to_bits());

        let seeded = Noise::pregenerated(64, Some(9)).unwrap();
        assert!(seeded.is_reproducible());
        let unseeded = Noise::pregenerated(64, None).unwrap();
        assert!(!unseeded.is_reproducible());
    }
}
