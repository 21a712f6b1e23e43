//! Error types for Terramesh

use thiserror::Error;

/// The main error type for Terramesh operations
#[derive(Debug, Error)]
pub enum TerrameshError {
    #[error("Insufficient resolution: heightfield is {width}x{height}, need at least 2x2")]
    InsufficientResolution { width: u32, height: u32 },

    #[error("Sample count mismatch: expected {expected} elevation samples, got {got}")]
    SampleCountMismatch { expected: usize, got: usize },

    #[error("Resolution too large: {width}x{height} vertices exceed 32-bit indexing")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("Non-finite elevation {value} at ({x}, {y})")]
    NonFiniteElevation { x: u32, y: u32, value: f32 },

    #[error("Heightmap error: {0}")]
    Heightmap(String),

    #[error("Terrain source error: {0}")]
    Source(String),

    #[error("Duplicate terrain name: {0}")]
    DuplicateTerrainName(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialization error: {0}")]
    TomlSer(String),
}

/// Result type alias for Terramesh operations
pub type Result<T> = std::result::Result<T, TerrameshError>;

impl From<toml::de::Error> for TerrameshError {
    fn from(err: toml::de::Error) -> Self {
        TerrameshError::TomlParse(err.to_string())
    }
}

impl From<toml::ser::Error> for TerrameshError {
    fn from(err: toml::ser::Error) -> Self {
        TerrameshError::TomlSer(err.to_string())
    }
}
