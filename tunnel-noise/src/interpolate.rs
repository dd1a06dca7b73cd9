//! Blending between two lattice samples

use std::f64::consts::PI;

/// Blend strategy. `blend(a, b, 0) == a` and `blend(a, b, 1) == b` exactly.
pub trait Interpolator {
    fn blend(&self, a: f64, b: f64, t: f64) -> f64;
}

/// Straight-line blend. Cheapest, with visible creases at lattice edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

/// Half-cosine eased blend: zero slope at both endpoints, one `cos` per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cosine;

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

impl Interpolator for Linear {
    #[inline]
    fn blend(&self, a: f64, b: f64, t: f64) -> f64 {
        lerp(a, b, t)
    }
}

impl Interpolator for Cosine {
    #[inline]
    fn blend(&self, a: f64, b: f64, t: f64) -> f64 {
        let eased = (1.0 - (t * PI).cos()) * 0.5;
        lerp(a, b, eased)
    }
}

/// Interpolation selected by configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    Linear,
    #[default]
    Cosine,
}

impl Interpolator for Interpolation {
    #[inline]
    fn blend(&self, a: f64, b: f64, t: f64) -> f64 {
        match self {
            Interpolation::Linear => Linear.blend(a, b, t),
            Interpolation::Cosine => Cosine.blend(a, b, t),
        }
    }
}

impl<T: Interpolator + ?Sized> Interpolator for &T {
    #[inline]
    fn blend(&self, a: f64, b: f64, t: f64) -> f64 {
        (**self).blend(a, b, t)
    }
}
