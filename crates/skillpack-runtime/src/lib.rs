//! Verified loading and read-only serving of skillpack bundles.
//!
//! [`load`] checks the artifact against its SHA-256 sidecar before parsing
//! anything, then builds a [`ContentIndex`]. The index is immutable and can
//! be shared across threads behind an `Arc`.
//!
//! ## Modules
//!
//! - [`loader`] - Digest verification and startup loading
//! - [`index`] - Lookup by identifier and name
//! - [`access`] - List, get and compose
//! - [`surface`] - Resource, tool and prompt descriptors
//! - [`error`] - Error types

pub mod access;
pub mod error;
pub mod index;
pub mod loader;
pub mod surface;

pub use error::{EntryKind, Error, Result};
pub use index::{ContentIndex, SkillEntry, SubagentEntry};
pub use loader::{Verification, load, verify};
pub use surface::{
    PromptArgument, PromptDescriptor, PromptOutput, ResourceContents, ResourceDescriptor,
    ToolDescriptor, call_tool, get_prompt, list_prompts, list_resources, list_tools,
    read_resource,
};
