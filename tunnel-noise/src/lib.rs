//! Value-noise core for the hyperspace tunnel effect
//!
//! Architecture:
//! 1. `source` - Lattice noise: hashed (pure) or pregenerated (lazy table)
//! 2. `interpolate` - Blending strategies between two lattice samples
//! 3. `polar` - Pixel offset to (pseudo-angle, tunnel depth) remap
//! 4. `octave` - Fractal summation over octaves in polar lattice space
//!
//! Everything here is pure arithmetic. The only shared state is the
//! pregenerated table, which is built at most once behind a `OnceLock`.

mod error;
pub mod interpolate;
pub mod octave;
pub mod polar;
pub mod source;
mod table;

pub use error::NoiseError;
pub use interpolate::{Cosine, Interpolation, Interpolator, Linear};
pub use octave::{synthesize, AMPLITUDE_SCALE, ANGULAR_DIVISOR, MAX_SUPPORTED_OCTAVE, RADIAL_DIVISOR};
pub use polar::{map_to_polar, PolarSample, TunnelGeometry};
pub use source::{hashed_value, HashedNoise, Noise, NoiseSource, SAMPLE_MAX};
pub use table::PregeneratedNoise;
