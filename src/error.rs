// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum LabError {
    /// A generator was registered without one of its two constructors.
    #[error("invalid constructor shape for {generator}: missing {missing} constructor")]
    InvalidConstructorShape {
        /// Name of the generator being registered.
        generator: &'static str,
        /// Which constructor is absent ("seeded" or "default").
        missing: &'static str,
    },

    /// The configuration file could not be read as JSON.
    #[error("configuration error: {0}")]
    Config(String),

    /// Creating a directory or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path that was being created or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Encoding an image failed.
    #[error("image encoding error at {}: {source}", path.display())]
    Encode {
        /// Path of the image being written.
        path: PathBuf,
        /// Underlying error.
        source: image::ImageError,
    },

    /// The configured image size cannot be stored in the output format.
    #[error("image size {size} exceeds the maximum of {max}")]
    ImageSize {
        /// Requested width and height.
        size: usize,
        /// Largest supported width and height.
        max: usize,
    },
}

impl LabError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> LabError {
        let path = path.into();
        move |source| LabError::Io { path, source }
    }

    pub(crate) fn encode(
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(image::ImageError) -> LabError {
        let path = path.into();
        move |source| LabError::Encode { path, source }
    }
}
