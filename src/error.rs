//! Error types for the waveform player.

use thiserror::Error;

/// Errors raised while building a player or its style.
///
/// These are fatal: a player that failed construction is never handed out.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Container id was empty or blank
    #[error("Player should be given a container id")]
    MissingContainerId,

    /// A palette entry is not a `#rgb` / `#rrggbb` hex color
    #[error("Invalid color for `{field}`: {value:?}")]
    InvalidColor { field: &'static str, value: String },

    /// Width, height or bar pitch is zero
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Perceptual exponent is not a positive finite number
    #[error("Invalid exponent: {0}")]
    InvalidExponent(f64),

    /// Style document is not a valid TOML table of known keys
    #[error("Failed to parse style config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Style file could not be read
    #[error("Failed to read style config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a single setter call. The player stays usable.
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    /// Waveform input had no samples at all
    #[error("Waveform data should contain at least one sample")]
    EmptyWaveform,

    /// A token in a peaks document is not an integer
    #[error("Malformed waveform sample {token:?} at position {position}")]
    MalformedSample { position: usize, token: String },

    /// Media url was empty or blank
    #[error("Player should be given a media url")]
    MissingMediaUrl,

    /// Duration was zero, negative or not finite
    #[error("Player should be given a positive duration, got {0}")]
    InvalidDuration(f64),
}

/// Any error surfaced by the player API.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Result type for player operations
pub type PlayerResult<T> = Result<T, PlayerError>;
