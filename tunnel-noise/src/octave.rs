//! Fractal octave summation in polar lattice space
//!
//! Each octave doubles the lattice density in both the angular and radial
//! direction and halves its amplitude. The angular axis is a ring: the
//! lattice wraps every `4 * 2^octave` cells so there is no seam where the
//! pseudo-angle rolls over from 256 back to 0.
//!
//! Octaves run from 1 up to but excluding `max_octave`, so `max_octave = N`
//! gives `N - 1` layers and `max_octave = 1` gives a flat zero field.

use crate::interpolate::Interpolator;
use crate::polar::PolarSample;
use crate::source::NoiseSource;

// The divisors fix the size of the coarsest noise feature: 64 pseudo-angle
// units and 4 depth units per lattice cell before octave scaling.
pub const ANGULAR_DIVISOR: f64 = 64.0;
pub const RADIAL_DIVISOR: f64 = 4.0;
/// Angular lattice cells per octave scale unit
const ANGULAR_PERIOD_FACTOR: i64 = 4;
/// Per-octave weight numerator; also the final normaliser
pub const AMPLITUDE_SCALE: f64 = 256.0;

/// Octaves beyond this weigh less than 2^-32 and are skipped
pub const MAX_SUPPORTED_OCTAVE: u32 = 32;

/// Integer cell and fractional offset of a lattice coordinate.
/// The fraction is in `[0, 1)` for every finite input.
#[inline]
fn split(pos: f64) -> (i64, f64) {
    let cell = pos.floor();
    (cell as i64, pos - cell)
}

/// Contribution of one octave, before amplitude weighting
#[inline]
fn octave_value<I, N>(sample: PolarSample, time: f64, octave: u32, interpolator: &I, noise: &N) -> f64
where
    I: Interpolator + ?Sized,
    N: NoiseSource + ?Sized,
{
    let scale = (1u64 << octave) as f64;
    let period = ANGULAR_PERIOD_FACTOR << octave;

    let theta_pos = scale * sample.theta / ANGULAR_DIVISOR;
    let radius_pos = scale * sample.r / RADIAL_DIVISOR + time;

    let (theta_cell, theta_frac) = split(theta_pos);
    let (radius_cell, radius_frac) = split(radius_pos);
    // Angles a whole turn apart land on the same ring cell
    let theta_cell = theta_cell.rem_euclid(period);

    let index = |angular: i64, radial: i64| angular.wrapping_add(period.wrapping_mul(radial));

    let t1 = noise.sample(index(theta_cell, radius_cell));
    let t2 = noise.sample(index(theta_cell, radius_cell.wrapping_add(1)));

    // Neighbouring angular cell, wrapped onto the ring
    let mut next_theta = theta_cell + 1;
    if next_theta >= period {
        next_theta -= period;
    }
    let t3 = noise.sample(index(next_theta, radius_cell));
    let t4 = noise.sample(index(next_theta, radius_cell.wrapping_add(1)));

    let i1 = interpolator.blend(t1, t2, radius_frac);
    let i2 = interpolator.blend(t3, t4, radius_frac);
    interpolator.blend(i1, i2, theta_frac)
}

/// Sum noise octaves at a polar sample.
///
/// `time` slides the radial sampling window, so advancing it makes the
/// field flow along the tunnel without rotating. The result is
/// `sum / 256`, which lies in `[0, 255)` for any source bounded by 255.
pub fn synthesize<I, N>(sample: PolarSample, time: f64, max_octave: u32, interpolator: &I, noise: &N) -> f64
where
    I: Interpolator + ?Sized,
    N: NoiseSource + ?Sized,
{
    let top = max_octave.min(MAX_SUPPORTED_OCTAVE + 1);
    let mut sum = 0.0;
    for octave in 1..top {
        let scale = (1u64 << octave) as f64;
        sum += octave_value(sample, time, octave, interpolator, noise) * AMPLITUDE_SCALE / scale;
    }
    sum / AMPLITUDE_SCALE
}
