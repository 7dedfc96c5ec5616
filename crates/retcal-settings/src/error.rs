//! Error types for settings overlay handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a settings overlay.
///
/// A missing overlay file is not an error; see
/// [`crate::overlay::load_or_default`].
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The overlay file exists but could not be read.
    #[error("Failed to read overlay {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The overlay file is not valid JSON.
    #[error("Invalid JSON overlay {path}: {reason}")]
    InvalidJson { path: PathBuf, reason: String },

    /// The overlay file is not valid TOML.
    #[error("Invalid TOML overlay {path}: {reason}")]
    InvalidToml { path: PathBuf, reason: String },

    /// The overlay file extension is not recognized.
    #[error("Overlay must be .json or .toml: {0}")]
    UnsupportedExtension(PathBuf),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
