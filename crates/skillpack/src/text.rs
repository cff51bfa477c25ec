//! Generated catalog and overview documents.

use std::fmt::Write as _;
use std::path::Path;

use crate::Result;
use crate::catalog::{Catalog, read_optional};
use crate::manifest::ProductManifest;

/// Shown in the catalog for entries without a description.
pub const MISSING_DESCRIPTION: &str = "No description provided.";

/// Shown in the overview when the manifest declares no version.
pub const UNKNOWN_VERSION: &str = "unknown";

const EMPTY_SECTION: &str = "_None._";

const GUIDANCE: &str = "\
Skills are read through `skill://<name>` resources (and `skill://<name>/reference` \
when a reference document exists). Subagents are read through `subagent://<name>`. \
The `get_skill` and `get_subagent` tools return the same content, and the \
`use_skill` and `use_subagent` prompts combine it with your request. \
See `skillpack://catalog` for everything available.";

/// Render the catalog listing, one line per skill and subagent.
#[must_use]
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("# Catalog\n\n## Skills\n\n");
    push_entries(
        &mut out,
        catalog
            .skills
            .iter()
            .map(|s| (s.name.as_str(), s.id.as_str(), s.description.as_deref())),
    );
    out.push_str("\n## Subagents\n\n");
    push_entries(
        &mut out,
        catalog
            .subagents
            .iter()
            .map(|a| (a.name.as_str(), a.id.as_str(), a.description.as_deref())),
    );
    out
}

fn push_entries<'a>(
    out: &mut String,
    entries: impl Iterator<Item = (&'a str, &'a str, Option<&'a str>)>,
) {
    let mut any = false;
    for (name, id, description) in entries {
        any = true;
        // Multi-line descriptions are folded so each entry stays on one line.
        let description = description
            .map(|d| d.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());
        let _ = writeln!(out, "- **{name}** (`{id}`): {description}");
    }
    if !any {
        out.push_str(EMPTY_SECTION);
        out.push('\n');
    }
}

/// Render the overview blurb from the product manifest.
#[must_use]
pub fn render_overview(manifest: &ProductManifest) -> String {
    let version = manifest.version.as_deref().unwrap_or(UNKNOWN_VERSION);
    let mut out = format!("# {} v{version}\n\n", manifest.name);
    if let Some(description) = &manifest.description {
        out.push_str(description);
        out.push_str("\n\n");
    }
    out.push_str(GUIDANCE);
    out.push('\n');
    out
}

/// Read the "when to use" document verbatim, or an empty string if absent.
///
/// # Errors
///
/// Returns an error only when the file exists but cannot be read as UTF-8.
pub fn load_when_to_use(path: &Path) -> Result<String> {
    Ok(read_optional(path)?.unwrap_or_default())
}
