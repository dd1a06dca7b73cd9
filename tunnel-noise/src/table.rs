//! Pregenerated noise table
//!
//! A fixed-length buffer of uniform values in `[0, 255]`, built on the first
//! sample and read-only afterwards. Lookups are `table[index mod size]`.
//!
//! Unless constructed with an explicit seed, the table seed is drawn from OS
//! entropy, so two runs produce different tunnels. This is the price of
//! replacing the hash with a single load.

use std::fmt;
use std::sync::OnceLock;

use crate::error::NoiseError;
use crate::source::{NoiseSource, SAMPLE_MAX};

/// Smallest usable xorshift state; zero is a fixed point
const MIN_STATE: u32 = 0x155;

/// Marsaglia xorshift32
fn xorshift(mut x: u32) -> u32 {
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    x
}

fn entropy_seed() -> Result<u32, NoiseError> {
    let mut buf = [0u8; 4];
    getrandom::getrandom(&mut buf).map_err(|e| NoiseError::Entropy(e.to_string()))?;
    Ok(u32::from_le_bytes(buf))
}

/// Lazily built lookup table of noise values
pub struct PregeneratedNoise {
    size: usize,
    seed: u32,
    explicit_seed: bool,
    table: OnceLock<Box<[f64]>>,
}

impl PregeneratedNoise {
    /// Create an unbuilt table of `size` values.
    ///
    /// Fails with [`NoiseError::EmptyTable`] for `size == 0`, or with
    /// [`NoiseError::Entropy`] if no seed was given and the OS refuses one.
    pub fn new(size: usize, seed: Option<u32>) -> Result<Self, NoiseError> {
        if size == 0 {
            return Err(NoiseError::EmptyTable);
        }
        let (seed, explicit_seed) = match seed {
            Some(s) => (s, true),
            None => (entropy_seed()?, false),
        };
        Ok(Self {
            size,
            seed,
            explicit_seed,
            table: OnceLock::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Seed the table is (or will be) generated from
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn is_explicitly_seeded(&self) -> bool {
        self.explicit_seed
    }

    pub fn is_built(&self) -> bool {
        self.table.get().is_some()
    }

    /// The table, building it on first access. Concurrent first callers
    /// block until a single builder finishes.
    pub fn values(&self) -> &[f64] {
        self.table.get_or_init(|| {
            tracing::debug!(size = self.size, seed = self.seed, "building pregenerated noise table");
            let mut state = self.seed.max(MIN_STATE);
            (0..self.size)
                .map(|_| {
                    state = xorshift(state);
                    // Top 24 bits give an exact f64 fraction in [0, 1]
                    SAMPLE_MAX * ((state >> 8) as f64 / 0x00ff_ffff as f64)
                })
                .collect()
        })
    }
}

impl NoiseSource for PregeneratedNoise {
    #[inline]
    fn sample(&self, index: i64) -> f64 {
        let values = self.values();
        values[index.rem_euclid(self.size as i64) as usize]
    }
}

impl fmt::Debug for PregeneratedNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PregeneratedNoise")
            .field("size", &self.size)
            .field("seed", &self.seed)
            .field("explicit_seed", &self.explicit_seed)
            .field("built", &self.is_built())
            .finish()
    }
}
