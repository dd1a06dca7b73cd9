use tunnel_noise::NoiseError;

/// Rejected configuration. Raised before any rendering state exists.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("width must be positive, got {0}")]
    Width(i64),

    #[error("height must be positive, got {0}")]
    Height(i64),

    #[error("max octave must be at least 1, got {0}")]
    MaxOctave(i64),

    #[error("{width}x{height} pixels do not fit in memory")]
    PixelCount { width: usize, height: usize },

    #[error("noise table size must be positive, got {0}")]
    TableSize(i64),

    #[error("frame count must not be negative, got {0}")]
    FrameCount(i64),

    #[error("time step must be finite, got {0}")]
    TimeStep(f64),

    #[error("invalid tint {input:?}: {reason}")]
    Tint { input: String, reason: &'static str },

    #[error("invalid settings: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("noise error: {0}")]
    Noise(#[from] NoiseError),

    #[error("frame has no pixels")]
    EmptyFrame,

    #[error("no frames to export")]
    EmptySequence,

    #[error("image error: {0}")]
    Image(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
