//! Startup loading: verify the artifact, then index it.
//!
//! Verification runs over the exact bytes read from disk and must succeed
//! before any of those bytes are parsed.

use std::fs;
use std::path::Path;

use skillpack::{ContentBundle, sha256_hex, sidecar_path};

use crate::index::ContentIndex;
use crate::{Error, Result};

/// Outcome of checking artifact bytes against a recorded digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The bytes match the digest and may be parsed.
    Verified(Vec<u8>),
    /// The bytes do not match the digest.
    IntegrityFailure { expected: String, actual: String },
}

/// Check artifact bytes against the sidecar text.
///
/// The sidecar is trimmed and compared case-insensitively.
#[must_use]
pub fn verify(bytes: Vec<u8>, sidecar: &str) -> Verification {
    let expected = sidecar.trim();
    let actual = sha256_hex(&bytes);
    if !expected.is_empty() && expected.eq_ignore_ascii_case(&actual) {
        Verification::Verified(bytes)
    } else {
        Verification::IntegrityFailure {
            expected: expected.to_string(),
            actual,
        }
    }
}

/// Read, verify and index the artifact at `artifact`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the artifact or sidecar cannot be read,
/// [`Error::Integrity`] if they do not match, and [`Error::Json`] or
/// [`Error::InconsistentBundle`] if verified bytes are not a valid bundle.
pub fn load(artifact: &Path) -> Result<ContentIndex> {
    let bytes = fs::read(artifact).map_err(|source| Error::Io {
        path: artifact.to_path_buf(),
        source,
    })?;
    let sidecar = sidecar_path(artifact);
    let recorded = fs::read_to_string(&sidecar).map_err(|source| Error::Io {
        path: sidecar.clone(),
        source,
    })?;

    let bytes = match verify(bytes, &recorded) {
        Verification::Verified(bytes) => bytes,
        Verification::IntegrityFailure { expected, actual } => {
            log::error!(
                "refusing to load {}: sha256 {actual} does not match recorded {expected}",
                artifact.display()
            );
            return Err(Error::Integrity {
                path: artifact.to_path_buf(),
                expected,
                actual,
            });
        }
    };

    let bundle: ContentBundle = serde_json::from_slice(&bytes)?;
    let index = ContentIndex::new(bundle)?;
    log::info!(
        "loaded {} skills and {} subagents from {}",
        index.skill_meta().len(),
        index.subagent_meta().len(),
        artifact.display()
    );
    Ok(index)
}
