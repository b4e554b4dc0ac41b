//! Error types for configuration loading and validation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("cannot access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Defaults could not be written out
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A list setting has no entries
    #[error("{0} must not be empty")]
    EmptyList(&'static str),

    /// A color is not `rrggbb` hex
    #[error("invalid color {0:?}, expected rrggbb hex")]
    InvalidColor(String),

    /// A symbol is not exactly one character
    #[error("invalid symbol {0:?}, expected a single character")]
    InvalidSymbol(String),

    /// Movement speed is zero, negative or not a number
    #[error("movement speed must be positive, got {0}")]
    InvalidSpeed(f64),

    #[error("final gradient steps must be at least 1")]
    ZeroGradientSteps,

    #[error("frame rate must be at least 1")]
    ZeroFrameRate,
}
