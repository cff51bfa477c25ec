//! SHA-256 digests over artifact bytes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Suffix appended to the artifact path to name its digest sidecar.
pub const SIDECAR_SUFFIX: &str = ".sha256";

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Path of the digest sidecar for an artifact: the artifact path plus `.sha256`.
#[must_use]
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut raw = OsString::from(artifact.as_os_str());
    raw.push(SIDECAR_SUFFIX);
    PathBuf::from(raw)
}

/// The sidecar file contents for a digest.
#[must_use]
pub fn sidecar_contents(digest: &str) -> String {
    format!("{digest}\n")
}
