//! Record types produced by the catalog builder.

use std::collections::HashMap;

/// A skill read from a directory containing `SKILL.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRecord {
    /// The containing directory's name.
    pub id: String,
    /// The declared name, or `id` when the frontmatter has none.
    pub name: String,
    /// The declared description.
    pub description: Option<String>,
    /// Full text of `SKILL.md`, frontmatter included.
    pub content: String,
    /// Full text of `REFERENCE.md`, when the directory has one.
    pub reference: Option<String>,
}

impl SkillRecord {
    /// Whether a secondary reference document was bundled.
    #[must_use]
    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }
}

/// A subagent read from a single markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubagentRecord {
    /// The document's file stem.
    pub id: String,
    /// The declared name, or `id` when the frontmatter has none.
    pub name: String,
    /// The declared description.
    pub description: Option<String>,
    /// Full text of the document.
    pub content: String,
}

/// Records that carry the name they are keyed by.
pub trait Named {
    /// The key used for de-duplication.
    fn name(&self) -> &str;
    /// The source identifier, used in collision diagnostics.
    fn id(&self) -> &str;
}

impl Named for SkillRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for SubagentRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// An insertion-ordered map keyed by record name.
///
/// Inserting a record whose name is already present replaces the earlier
/// record in place, so the later record wins but the first position is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMap<T> {
    entries: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T> Default for NameMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Named> NameMap<T> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the record it replaced.
    pub fn insert(&mut self, record: T) -> Option<T> {
        if let Some(&pos) = self.positions.get(record.name()) {
            return Some(std::mem::replace(&mut self.entries[pos], record));
        }
        self.positions
            .insert(record.name().to_string(), self.entries.len());
        self.entries.push(record);
        None
    }

    /// Looks up a record by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.positions.get(name).map(|&pos| &self.entries[pos])
    }

    /// Iterates records in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a NameMap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
