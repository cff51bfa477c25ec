//! Error types for bundle builds.

use std::path::PathBuf;

/// Errors that can occur while building a bundle.
///
/// Missing source roots and missing `SKILL.md` files are not errors; the
/// builder treats them as empty collections.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred on a path that exists.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A source document is not valid UTF-8.
    #[error("invalid UTF-8 in {}", .0.display())]
    InvalidUtf8(PathBuf),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The build configuration is not valid TOML.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The product manifest exists but could not be parsed.
    #[error("invalid manifest {}: {source}", path.display())]
    Manifest {
        /// The manifest path.
        path: PathBuf,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for bundle builds.
pub type Result<T> = std::result::Result<T, Error>;
