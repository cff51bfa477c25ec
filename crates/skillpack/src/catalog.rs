//! Catalog builder: walks the skill and subagent source trees.
//!
//! The walk is split into stages that can be exercised on their own:
//! enumerate entries, filter to eligible sources, parse each source into a
//! record, then fold the records into a name-keyed map.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::frontmatter::parse_frontmatter;
use crate::records::{NameMap, Named, SkillRecord, SubagentRecord};
use crate::{Error, Result};

/// Primary document every skill directory must contain.
pub const SKILL_FILE: &str = "SKILL.md";

/// Optional secondary document stored next to [`SKILL_FILE`].
pub const REFERENCE_FILE: &str = "REFERENCE.md";

/// Extension of subagent documents.
pub const SUBAGENT_EXTENSION: &str = "md";

/// Skills and subagents collected from the source trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Skills keyed by name.
    pub skills: NameMap<SkillRecord>,
    /// Subagents keyed by name.
    pub subagents: NameMap<SubagentRecord>,
}

/// Build a catalog from a skills root and a subagents root.
///
/// Either root may be missing, which yields an empty collection.
///
/// # Errors
///
/// Returns [`Error::Io`] when an existing source cannot be read and
/// [`Error::InvalidUtf8`] when a document is not UTF-8 text.
pub fn build_catalog(skills_root: &Path, subagents_root: &Path) -> Result<Catalog> {
    Ok(Catalog {
        skills: collect_skills(skills_root)?,
        subagents: collect_subagents(subagents_root)?,
    })
}

/// Collect every skill directory under `root`.
///
/// # Errors
///
/// See [`build_catalog`].
pub fn collect_skills(root: &Path) -> Result<NameMap<SkillRecord>> {
    let mut records = Vec::new();
    for dir in list_entries(root)?.into_iter().filter(|p| p.is_dir()) {
        let Some(id) = file_name(&dir) else {
            continue;
        };
        let Some(content) = read_optional(&dir.join(SKILL_FILE))? else {
            log::debug!("skipping {}: no {SKILL_FILE}", dir.display());
            continue;
        };
        let reference = read_optional(&dir.join(REFERENCE_FILE))?;
        records.push(parse_skill(id, content, reference));
    }
    Ok(fold_records("skill", records))
}

/// Collect every subagent document directly under `root`.
///
/// # Errors
///
/// See [`build_catalog`].
pub fn collect_subagents(root: &Path) -> Result<NameMap<SubagentRecord>> {
    let mut records = Vec::new();
    for path in list_entries(root)?
        .into_iter()
        .filter(|p| is_subagent_document(p))
    {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(content) = read_optional(&path)? else {
            continue;
        };
        records.push(parse_subagent(id, content));
    }
    Ok(fold_records("subagent", records))
}

/// Build a skill record from its directory name and document text.
#[must_use]
pub fn parse_skill(id: &str, content: String, reference: Option<String>) -> SkillRecord {
    let fm = parse_frontmatter(&content);
    let name = fm.name.unwrap_or_else(|| id.to_string());
    let description = fm.description;
    SkillRecord {
        id: id.to_string(),
        name,
        description,
        content,
        reference,
    }
}

/// Build a subagent record from its file stem and document text.
#[must_use]
pub fn parse_subagent(id: &str, content: String) -> SubagentRecord {
    let fm = parse_frontmatter(&content);
    let name = fm.name.unwrap_or_else(|| id.to_string());
    let description = fm.description;
    SubagentRecord {
        id: id.to_string(),
        name,
        description,
        content,
    }
}

/// Fold records into a name-keyed map. Later records replace earlier ones.
pub fn fold_records<T: Named>(kind: &str, records: impl IntoIterator<Item = T>) -> NameMap<T> {
    let mut map = NameMap::new();
    for record in records {
        let winner = record.id().to_string();
        if let Some(replaced) = map.insert(record) {
            log::warn!(
                "{kind} name '{}' declared by both '{}' and '{winner}'; keeping '{winner}'",
                replaced.name(),
                replaced.id(),
            );
        }
    }
    map
}

/// Non-hidden entries of `root`, sorted by file name. A missing root is empty.
fn list_entries(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("source root {} does not exist", root.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(root, e)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        let path = entry.path();
        if file_name(&path).is_some_and(|n| !n.starts_with('.')) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn is_subagent_document(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == SUBAGENT_EXTENSION)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Read a UTF-8 document, treating a missing file as `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| Error::InvalidUtf8(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
