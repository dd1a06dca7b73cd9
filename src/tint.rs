//! Colour tint for grayscale frames
//!
//! Each channel is `round(intensity / 255 * channel)`; alpha is constant.

use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::render::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Tint {
    /// Neutral tint: gray stays gray
    pub const WHITE: Tint = Tint { r: 255, g: 255, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    fn scale(intensity: u8, channel: u8) -> u8 {
        (intensity as f64 / 255.0 * channel as f64).round() as u8
    }

    /// RGBA of a single intensity
    #[inline]
    pub fn apply(&self, intensity: u8) -> [u8; 4] {
        [
            Self::scale(intensity, self.r),
            Self::scale(intensity, self.g),
            Self::scale(intensity, self.b),
            self.a,
        ]
    }

    /// Row-major RGBA8 buffer of a whole frame
    pub fn colorize(&self, frame: &Frame) -> Vec<u8> {
        frame.pixels().iter().flat_map(|&p| self.apply(p)).collect()
    }
}

impl FromStr for Tint {
    type Err = ConfigurationError;

    /// `r,g,b` or `r,g,b,a`, each 0-255
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ConfigurationError::Tint { input: s.to_string(), reason };
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| err("channels must be integers in 0..=255"))?;
        match parts[..] {
            [r, g, b] => Ok(Tint::new(r, g, b, 255)),
            [r, g, b, a] => Ok(Tint::new(r, g, b, a)),
            _ => Err(err("expected r,g,b or r,g,b,a")),
        }
    }
}
