//! Pixel to tunnel coordinates
//!
//! A pixel's offset from the image center becomes a pseudo-angle in
//! `[0, 256]` and a depth coordinate. Depth is `tan` of the distance from
//! the image corner, scaled so the corner maps to 0 and the center to the
//! tangent's pole, which reads as an infinitely deep vanishing point.

use std::f64::consts::{FRAC_PI_2, PI};

/// Pseudo-angle at `atan2 == 0`; the half-turn of the 0..256 angle space
pub const THETA_OFFSET: f64 = 128.0;
/// Radians to pseudo-angle units
pub const THETA_SCALE: f64 = 128.0 / PI;

/// Polar coordinates of one pixel in tunnel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarSample {
    /// Pseudo-angle, 0..=256 for one full turn
    pub theta: f64,
    /// Tunnel depth: 0 at the image corners, growing without bound toward the center
    pub r: f64,
}

/// Per-image constants for the polar remap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunnelGeometry {
    half_width: f64,
    half_height: f64,
    center_to_corner: f64,
    tangent_scale: f64,
}

impl TunnelGeometry {
    pub fn new(width: usize, height: usize) -> Self {
        let half_width = width as f64 / 2.0;
        let half_height = height as f64 / 2.0;
        let center_to_corner = (half_width * half_width + half_height * half_height).sqrt();
        Self {
            half_width,
            half_height,
            center_to_corner,
            tangent_scale: PI / (2.0 * center_to_corner),
        }
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn center_to_corner(&self) -> f64 {
        self.center_to_corner
    }

    /// Map a pixel position to tunnel coordinates.
    ///
    /// Points farther from the center than the corners (only reachable
    /// with out-of-image coordinates) are clamped onto the corner radius,
    /// keeping the tangent argument in `[0, pi/2]`.
    #[inline]
    pub fn to_polar(&self, x: f64, y: f64) -> PolarSample {
        let dx = x - self.half_width;
        let dy = y - self.half_height;

        let theta = THETA_OFFSET + THETA_SCALE * dy.atan2(dx);

        let distance = (dx * dx + dy * dy).sqrt().min(self.center_to_corner);
        // Rounding in the scale can push the exact center one ulp past the
        // pole, where tan flips sign.
        let angle = (self.tangent_scale * (self.center_to_corner - distance)).min(FRAC_PI_2);
        let r = angle.tan();

        PolarSample { theta, r }
    }
}

/// One-shot form of [`TunnelGeometry::to_polar`] for integer pixels
pub fn map_to_polar(x: usize, y: usize, width: usize, height: usize) -> PolarSample {
    TunnelGeometry::new(width, height).to_polar(x as f64, y as f64)
}
