#![doc = include_str!("../README.md")]
//!
//! ## Modules
//!
//! - [`frontmatter`] - Name and description extraction
//! - [`records`] - Skill and subagent records, name-keyed map
//! - [`catalog`] - Source tree walking and collision folding
//! - [`manifest`] - Product name, description and version
//! - [`text`] - Generated catalog and overview documents
//! - [`bundle`] - Bundle data model and writer
//! - [`digest`] - SHA-256 digests and sidecar paths
//! - [`config`] - Build configuration
//! - [`error`] - Error types

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod digest;
pub mod error;
pub mod frontmatter;
pub mod manifest;
mod pipeline;
pub mod records;
pub mod text;

pub use bundle::{
    BuildOutput, BundleContent, ContentBundle, OrderedEntries, SkillContent, SkillMeta,
    SubagentContent, SubagentMeta,
};
pub use catalog::{Catalog, REFERENCE_FILE, SKILL_FILE, build_catalog};
pub use config::{ARTIFACT_FILE, BuildConfig};
pub use digest::{sha256_hex, sidecar_path};
pub use error::{Error, Result};
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use manifest::{ProductManifest, load_product_manifest};
pub use pipeline::build;
pub use records::{NameMap, SkillRecord, SubagentRecord};
