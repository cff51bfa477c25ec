//! Read-only lookup structures built from a verified bundle.

use std::collections::HashMap;

use skillpack::{ContentBundle, SkillMeta, SubagentMeta, parse_frontmatter};

use crate::{EntryKind, Error, Result};

/// A skill with its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub id: String,
    pub name: String,
    /// Read from the content's frontmatter when the index is built.
    pub description: Option<String>,
    pub content: String,
    pub reference: Option<String>,
}

/// A subagent with its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubagentEntry {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub content: String,
}

/// Entries addressable by identifier and by name.
#[derive(Debug)]
struct Lookup<T> {
    entries: Vec<T>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl<T> Lookup<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    fn push(&mut self, id: &str, name: &str, entry: T) {
        let pos = self.entries.len();
        self.entries.push(entry);
        self.by_id.entry(id.to_string()).or_insert(pos);
        self.by_name.insert(name.to_string(), pos);
    }

    fn by_name(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).map(|&pos| &self.entries[pos])
    }

    /// Identifier first, then name.
    fn resolve(&self, key: &str) -> Option<&T> {
        self.by_id
            .get(key)
            .or_else(|| self.by_name.get(key))
            .map(|&pos| &self.entries[pos])
    }
}

/// The in-memory index a server answers every request from.
///
/// Built once after verification and never mutated.
#[derive(Debug)]
pub struct ContentIndex {
    skill_meta: Vec<SkillMeta>,
    subagent_meta: Vec<SubagentMeta>,
    skills: Lookup<SkillEntry>,
    subagents: Lookup<SubagentEntry>,
    catalog: String,
    when_to_use: String,
    overview: String,
}

impl ContentIndex {
    /// Index a parsed bundle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentBundle`] when a listed name has no
    /// content entry or `hasReference` disagrees with the content.
    pub fn new(bundle: ContentBundle) -> Result<Self> {
        let ContentBundle {
            skills: skill_meta,
            subagents: subagent_meta,
            content,
        } = bundle;

        let mut skill_content: HashMap<_, _> = content.skills.0.into_iter().collect();
        let mut skills = Lookup::new();
        for meta in &skill_meta {
            let entry = skill_content
                .remove(&meta.name)
                .ok_or_else(|| missing_content(EntryKind::Skill, &meta.name))?;
            if entry.reference.is_some() != meta.has_reference {
                return Err(Error::InconsistentBundle(format!(
                    "skill '{}' hasReference is {} but reference is {}",
                    meta.name,
                    meta.has_reference,
                    if entry.reference.is_some() { "present" } else { "null" },
                )));
            }
            skills.push(
                &meta.id,
                &meta.name,
                SkillEntry {
                    id: meta.id.clone(),
                    name: meta.name.clone(),
                    description: description_of(&entry.content),
                    content: entry.content,
                    reference: entry.reference,
                },
            );
        }

        let mut subagent_content: HashMap<_, _> = content.subagents.0.into_iter().collect();
        let mut subagents = Lookup::new();
        for meta in &subagent_meta {
            let entry = subagent_content
                .remove(&meta.name)
                .ok_or_else(|| missing_content(EntryKind::Subagent, &meta.name))?;
            subagents.push(
                &meta.id,
                &meta.name,
                SubagentEntry {
                    id: meta.id.clone(),
                    name: meta.name.clone(),
                    description: description_of(&entry.content),
                    content: entry.content,
                },
            );
        }

        Ok(Self {
            skill_meta,
            subagent_meta,
            skills,
            subagents,
            catalog: content.catalog,
            when_to_use: content.when_to_use,
            overview: content.overview,
        })
    }

    pub(crate) fn skill_meta(&self) -> &[SkillMeta] {
        &self.skill_meta
    }

    pub(crate) fn subagent_meta(&self) -> &[SubagentMeta] {
        &self.subagent_meta
    }

    pub(crate) fn resolve_skill(&self, key: &str) -> Option<&SkillEntry> {
        self.skills.resolve(key)
    }

    pub(crate) fn resolve_subagent(&self, key: &str) -> Option<&SubagentEntry> {
        self.subagents.resolve(key)
    }

    pub(crate) fn skill_by_name(&self, name: &str) -> Option<&SkillEntry> {
        self.skills.by_name(name)
    }

    pub(crate) fn subagent_by_name(&self, name: &str) -> Option<&SubagentEntry> {
        self.subagents.by_name(name)
    }

    /// The generated catalog listing.
    #[must_use]
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// The "when to use" guidance, empty when none was bundled.
    #[must_use]
    pub fn when_to_use(&self) -> &str {
        &self.when_to_use
    }

    /// The generated overview.
    #[must_use]
    pub fn overview(&self) -> &str {
        &self.overview
    }
}

fn description_of(content: &str) -> Option<String> {
    parse_frontmatter(content).description
}

fn missing_content(kind: EntryKind, name: &str) -> Error {
    Error::InconsistentBundle(format!("{kind} '{name}' is listed but has no content"))
}
