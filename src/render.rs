//! Frame rendering
//!
//! Every pixel is mapped to tunnel coordinates and run through the octave
//! synthesizer. Pixels are independent, so rows are rendered in parallel
//! and so are the frames of a sequence. Frames are row-major:
//! `pixels[y * width + x]`, `y` in `0..height`, `x` in `0..width`.

use std::time::Instant;

use rayon::prelude::*;
use tunnel_noise::synthesize;

use crate::checksum::frame_crc32;
use crate::config::Configuration;

/// One rendered instant: a `height x width` grid of intensity bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        (width.checked_mul(height) == Some(pixels.len())).then_some(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Intensity at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.pixels[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn checksum(&self) -> u32 {
        frame_crc32(self)
    }
}

/// Time-ordered frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl From<Vec<Frame>> for FrameSequence {
    fn from(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

impl IntoIterator for FrameSequence {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Synthesized intensity of pixel `(x, y)` at `time`, in `[0, 255)`
#[inline]
pub fn intensity_at(config: &Configuration, x: usize, y: usize, time: f64) -> f64 {
    let sample = config.geometry().to_polar(x as f64, y as f64);
    let interpolation = config.interpolation();
    synthesize(sample, time, config.max_octave(), &interpolation, config.noise())
}

/// Truncating cast; out-of-range values saturate and NaN becomes 0
#[inline]
fn to_byte(value: f64) -> u8 {
    value as u8
}

fn render_row(config: &Configuration, y: usize, time: f64, row: &mut [u8]) {
    for (x, pixel) in row.iter_mut().enumerate() {
        *pixel = to_byte(intensity_at(config, x, y, time));
    }
}

/// Render one frame at `time`, rows in parallel
pub fn render_frame(config: &Configuration, time: f64) -> Frame {
    let (width, height) = (config.width(), config.height());
    let mut pixels = vec![0u8; width * height];
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| render_row(config, y, time, row));
    tracing::trace!(time, "frame rendered");
    Frame { width, height, pixels }
}

/// Single-threaded reference for [`render_frame`]; output is identical
pub fn render_frame_serial(config: &Configuration, time: f64) -> Frame {
    let (width, height) = (config.width(), config.height());
    let mut pixels = vec![0u8; width * height];
    for (y, row) in pixels.chunks_mut(width).enumerate() {
        render_row(config, y, time, row);
    }
    Frame { width, height, pixels }
}

/// Render `frame_count` frames at times `0, step, 2 * step, ...`
pub fn render_sequence(config: &Configuration) -> FrameSequence {
    let started = Instant::now();
    let frames: Vec<Frame> = (0..config.frame_count())
        .into_par_iter()
        .map(|index| render_frame(config, config.frame_time(index)))
        .collect();
    tracing::info!(
        frames = frames.len(),
        width = config.width(),
        height = config.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sequence rendered"
    );
    FrameSequence { frames }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InterpolationMode, Settings};

    fn reference_config() -> Configuration {
        Settings::default()
            .with_size(120, 160)
            .with_max_octave(4)
            .with_interpolation(InterpolationMode::Cosine)
            .with_hashed_noise()
            .with_frames(20, 0.2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_reference_sequence() {
        let config = reference_config();
        let seq = render_sequence(&config);
        assert_eq!(seq.len(), 20);
        for frame in &seq {
            assert_eq!(frame.height(), 161);
            assert_eq!(frame.width(), 120);
            assert_eq!(frame.pixels().len(), 161 * 120);
            assert_eq!(frame.rows().count(), 161);
        }

        // The field flows between frames
        let first = seq.get(0).unwrap();
        let second = seq.get(1).unwrap();
        assert_ne!(first, second);

        // Rendering again reproduces every byte
        let again = render_sequence(&reference_config());
        assert_eq!(seq, again);
    }

    #[test]
    fn test_reference_corner_pixel_animates() {
        let config = reference_config();
        let t0 = intensity_at(&config, 0, 0, config.frame_time(0));
        let t1 = intensity_at(&config, 0, 0, config.frame_time(1));
        assert_ne!(t0, t1);
        assert_eq!(t0.to_bits(), intensity_at(&config, 0, 0, 0.0).to_bits());
        assert_eq!(render_frame(&config, 0.0).get(0, 0), Some(to_byte(t0)));
    }

    #[test]
    fn test_sequence_frame_times() {
        let config = Settings::default().with_size(16, 9).with_frames(4, 0.25).build().unwrap();
        let seq = render_sequence(&config);
        for (index, frame) in seq.iter().enumerate() {
            assert_eq!(*frame, render_frame(&config, index as f64 * 0.25));
        }
    }

    #[test]
    fn test_single_octave_is_black() {
        let config = Settings::default().with_size(40, 30).with_max_octave(1).build().unwrap();
        for time in [0.0, 3.5, -8.0] {
            let frame = render_frame(&config, time);
            assert!(frame.pixels().iter().all(|&p| p == 0));
            for (x, y) in [(0, 0), (20, 15), (39, 30)] {
                assert_eq!(intensity_at(&config, x, y, time), 0.0);
            }
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        for mode in [InterpolationMode::Linear, InterpolationMode::Cosine] {
            let config = Settings::default()
                .with_size(37, 22)
                .with_max_octave(6)
                .with_interpolation(mode)
                .build()
                .unwrap();
            assert_eq!(render_frame(&config, 1.7), render_frame_serial(&config, 1.7));
        }
    }

    #[test]
    fn test_extreme_times_render() {
        let config = Settings::default().with_size(24, 24).with_max_octave(8).build().unwrap();
        for time in [-1e9, -3.3, 0.0, 1e6, 1e12] {
            let frame = render_frame(&config, time);
            assert_eq!(frame.pixels().len(), 24 * 25);
            // Not a flat field
            assert!(frame.pixels().iter().any(|&p| p != frame.pixels()[0]), "time {time}");
        }
    }

    #[test]
    fn test_pregenerated_seeded_is_reproducible() {
        let build = || {
            Settings::default()
                .with_size(30, 20)
                .with_pregenerated_noise(1024, Some(77))
                .build()
                .unwrap()
        };
        let a = render_frame(&build(), 0.4);
        let b = render_frame(&build(), 0.4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pregenerated_renders_in_parallel() {
        let config = Settings::default()
            .with_size(50, 50)
            .with_pregenerated_noise(4096, Some(11))
            .with_frames(6, 0.3)
            .build()
            .unwrap();
        let seq = render_sequence(&config);
        assert_eq!(seq.len(), 6);
        assert_eq!(*seq.get(2).unwrap(), render_frame_serial(&config, config.frame_time(2)));
    }

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::from_pixels(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(frame.get(2, 0), Some(3));
        assert_eq!(frame.get(0, 1), Some(4));
        assert_eq!(frame.get(3, 0), None);
        assert_eq!(frame.get(0, 2), None);
        assert_eq!(frame.row(1), Some(&[4u8, 5, 6][..]));
        assert_eq!(frame.row(2), None);
        assert!(Frame::from_pixels(3, 3, vec![0; 4]).is_none());
        assert!(Frame::from_pixels(usize::MAX, 2, Vec::new()).is_none());
    }

    #[test]
    fn test_to_byte_saturates() {
        assert_eq!(to_byte(-4.0), 0);
        assert_eq!(to_byte(254.9), 254);
        assert_eq!(to_byte(300.0), 255);
        assert_eq!(to_byte(f64::NAN), 0);
    }

    #[test]
    fn test_empty_sequence() {
        let config = Settings::default().with_frames(0, 0.2).build().unwrap();
        assert!(render_sequence(&config).is_empty());
    }
}
