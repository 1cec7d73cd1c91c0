//! Error types for configuration, setup and image output.

use std::path::PathBuf;

/// Errors raised outside the numeric core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read a config file from disk.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] ron::error::SpannedError),

    /// Failed to serialize a config to RON.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[source] ron::Error),

    /// Failed to encode or write the rendered image.
    #[error("failed to write image {path}: {source}")]
    ImageWrite {
        /// Destination path.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },

    /// Generic I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Output path has an extension no encoder handles.
    #[error("unsupported output format {0:?}, expected .png, .jpg or .jpeg")]
    UnsupportedFormat(PathBuf),

    /// Render settings or scene cannot produce an image.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
