//! Render configuration
//!
//! `Settings` is the raw, deserializable form (JSON file or CLI flags);
//! `Configuration` is the validated, immutable value handed to the renderer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tunnel_noise::{Interpolation, Noise, TunnelGeometry};

use crate::error::{ConfigurationError, Result};

pub const DEFAULT_WIDTH: i64 = 120;
pub const DEFAULT_HEIGHT: i64 = 160;
pub const DEFAULT_MAX_OCTAVE: i64 = 4;
pub const DEFAULT_TABLE_SIZE: i64 = 65536;
pub const DEFAULT_FRAME_COUNT: i64 = 20;
pub const DEFAULT_TIME_STEP: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    Linear,
    #[default]
    Cosine,
}

impl From<InterpolationMode> for Interpolation {
    fn from(mode: InterpolationMode) -> Self {
        match mode {
            InterpolationMode::Linear => Interpolation::Linear,
            InterpolationMode::Cosine => Interpolation::Cosine,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NoiseMode {
    #[default]
    Hashed,
    Pregenerated,
}

/// Unvalidated render settings.
///
/// Integers are signed so that negative values survive parsing and are
/// reported as configuration errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: i64,
    pub height: i64,
    pub max_octave: i64,
    pub interpolation: InterpolationMode,
    pub noise: NoiseMode,
    pub table_size: i64,
    pub table_seed: Option<u32>,
    pub frame_count: i64,
    pub time_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_octave: DEFAULT_MAX_OCTAVE,
            interpolation: InterpolationMode::default(),
            noise: NoiseMode::default(),
            table_size: DEFAULT_TABLE_SIZE,
            table_seed: None,
            frame_count: DEFAULT_FRAME_COUNT,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> std::result::Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&text)?)
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_octave(mut self, max_octave: i64) -> Self {
        self.max_octave = max_octave;
        self
    }

    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    pub fn with_hashed_noise(mut self) -> Self {
        self.noise = NoiseMode::Hashed;
        self
    }

    pub fn with_pregenerated_noise(mut self, table_size: i64, seed: Option<u32>) -> Self {
        self.noise = NoiseMode::Pregenerated;
        self.table_size = table_size;
        self.table_seed = seed;
        self
    }

    pub fn with_frames(mut self, frame_count: i64, time_step: f64) -> Self {
        self.frame_count = frame_count;
        self.time_step = time_step;
        self
    }

    pub fn build(&self) -> Result<Configuration> {
        Configuration::from_settings(self)
    }
}

/// Even heights put a row of pixels exactly on the horizontal axis, which
/// shows up as a sampling glitch at a cardinal direction. Round up to odd.
pub fn odd_height(height: usize) -> usize {
    if height % 2 == 0 {
        height + 1
    } else {
        height
    }
}

/// Validated render configuration
#[derive(Debug)]
pub struct Configuration {
    width: usize,
    height: usize,
    max_octave: u32,
    interpolation: Interpolation,
    noise: Noise,
    frame_count: usize,
    time_step: f64,
    geometry: TunnelGeometry,
}

impl Configuration {
    /// Start from the defaults; finish with [`Settings::build`]
    pub fn builder() -> Settings {
        Settings::default()
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let width = positive(settings.width).ok_or(ConfigurationError::Width(settings.width))?;
        let requested_height =
            positive(settings.height).ok_or(ConfigurationError::Height(settings.height))?;
        if settings.max_octave < 1 {
            return Err(ConfigurationError::MaxOctave(settings.max_octave).into());
        }
        // The synthesizer ignores octaves past its supported range
        let max_octave = u32::try_from(settings.max_octave).unwrap_or(u32::MAX);
        let frame_count = usize::try_from(settings.frame_count)
            .map_err(|_| ConfigurationError::FrameCount(settings.frame_count))?;
        if !settings.time_step.is_finite() {
            return Err(ConfigurationError::TimeStep(settings.time_step).into());
        }

        let noise = match settings.noise {
            NoiseMode::Hashed => Noise::hashed(),
            NoiseMode::Pregenerated => {
                let size = positive(settings.table_size)
                    .ok_or(ConfigurationError::TableSize(settings.table_size))?;
                Noise::pregenerated(size, settings.table_seed)?
            }
        };

        let height = odd_height(requested_height);
        if width.checked_mul(height).is_none() {
            return Err(ConfigurationError::PixelCount { width, height }.into());
        }
        if height != requested_height {
            tracing::debug!(requested = requested_height, height, "height rounded up to odd");
        }

        tracing::debug!(
            width,
            height,
            max_octave,
            interpolation = ?settings.interpolation,
            noise = ?noise,
            frame_count,
            time_step = settings.time_step,
            "configuration validated"
        );

        Ok(Self {
            width,
            height,
            max_octave,
            interpolation: settings.interpolation.into(),
            noise,
            frame_count,
            time_step: settings.time_step,
            geometry: TunnelGeometry::new(width, height),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Always odd
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_octave(&self) -> u32 {
        self.max_octave
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn noise(&self) -> &Noise {
        &self.noise
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn geometry(&self) -> &TunnelGeometry {
        &self.geometry
    }

    /// Animation time of frame `index` in a sequence
    pub fn frame_time(&self, index: usize) -> f64 {
        index as f64 * self.time_step
    }
}

fn positive(value: i64) -> Option<usize> {
    if value > 0 {
        usize::try_from(value).ok()
    } else {
        None
    }
}
