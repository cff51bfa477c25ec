//! Error types for loading and serving bundles.

use std::fmt;
use std::path::PathBuf;

/// The kind of entry a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Skill,
    Subagent,
    Resource,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skill => write!(f, "skill"),
            Self::Subagent => write!(f, "subagent"),
            Self::Resource => write!(f, "resource"),
        }
    }
}

/// Errors that can occur while loading or serving a bundle.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The artifact or its sidecar could not be read.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact does not match its recorded digest.
    ///
    /// Fatal at startup: nothing from the artifact may be served.
    #[error(
        "integrity check failed for {}: expected sha256 {expected}, got {actual}",
        path.display()
    )]
    Integrity {
        /// The artifact path.
        path: PathBuf,
        /// Digest recorded in the sidecar.
        expected: String,
        /// Digest of the bytes on disk.
        actual: String,
    },

    /// The verified artifact is not a valid bundle.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The bundle's metadata and content sections disagree.
    #[error("inconsistent bundle: {0}")]
    InconsistentBundle(String),

    /// No entry matches the requested identifier or name.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// What was looked up.
        kind: EntryKind,
        /// The identifier or name the caller supplied.
        key: String,
    },

    /// The resource URI uses an unknown scheme or shape.
    #[error("invalid resource URI: {0}")]
    InvalidUri(String),

    /// The tool name is not one this server provides.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The prompt name is not one this server provides.
    #[error("unknown prompt: {0}")]
    UnknownPrompt(String),

    /// Tool or prompt arguments did not match the expected shape.
    #[error("invalid arguments for {name}: {source}")]
    InvalidArguments {
        /// The tool or prompt name.
        name: String,
        /// The deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn not_found(kind: EntryKind, key: &str) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Whether this is a caller-facing lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A specialized Result type for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
