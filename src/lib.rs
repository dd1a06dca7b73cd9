//! Hyperspace tunnel renderer
//!
//! Renders animated grayscale frames of fractal value noise sampled in
//! tunnel-remapped polar coordinates. The numeric core lives in the
//! `tunnel-noise` crate (re-exported as [`noise`]); this crate adds
//! configuration, frame rendering, animation, tinting and export.

pub mod animation;
pub mod checksum;
pub mod config;
pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod logging;
pub mod render;
pub mod tint;
pub use tunnel_noise as noise;

pub use animation::TunnelAnimation;
pub use checksum::{frame_crc32, sequence_crc32};
pub use config::{Configuration, InterpolationMode, NoiseMode, Settings};
pub use error::{ConfigurationError, Error, Result};
pub use logging::init_logging;
pub use render::{intensity_at, render_frame, render_frame_serial, render_sequence, Frame, FrameSequence};
pub use tint::Tint;
