//! Product descriptor for the generated overview.

use std::path::Path;

use serde::Deserialize;

use crate::catalog::read_optional;
use crate::{Error, Result};

/// Product identity shown in the generated overview.
///
/// Read from a `package.json` / `plugin.json` style descriptor; keys other
/// than `name`, `description` and `version` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductManifest {
    /// Product name, used as the overview heading.
    pub name: String,
    /// One-paragraph summary.
    #[serde(default)]
    pub description: Option<String>,
    /// Version string; the overview shows `unknown` when absent.
    #[serde(default)]
    pub version: Option<String>,
}

impl ProductManifest {
    /// A manifest carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            version: None,
        }
    }
}

/// Parse a product descriptor from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not JSON or lacks a string `name`.
pub fn parse_product_manifest(json: &str) -> serde_json::Result<ProductManifest> {
    serde_json::from_str(json)
}

/// Load the manifest at `path`, or fall back to one named `fallback_name`
/// when the file does not exist.
///
/// # Errors
///
/// Returns [`Error::Manifest`] when the file exists but is not a valid
/// descriptor, and [`Error::Io`] when it cannot be read.
pub fn load_product_manifest(path: &Path, fallback_name: &str) -> Result<ProductManifest> {
    match read_optional(path)? {
        Some(json) => parse_product_manifest(&json).map_err(|source| Error::Manifest {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            log::debug!("no manifest at {}, using '{fallback_name}'", path.display());
            Ok(ProductManifest::named(fallback_name))
        }
    }
}
