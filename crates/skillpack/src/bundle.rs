//! The persisted bundle and its writer.
//!
//! A bundle is one compact JSON document. Its digest is computed over the
//! exact bytes written to disk and stored in a sidecar file next to it, so
//! a loader must verify the same bytes it reads rather than a
//! re-serialization.

use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::Catalog;
use crate::digest::{sha256_hex, sidecar_contents, sidecar_path};
use crate::records::{SkillRecord, SubagentRecord};
use crate::{Error, Result};

/// Listing metadata for a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMeta {
    /// The skill's directory name.
    pub id: String,
    /// The name the skill is keyed by.
    pub name: String,
    /// Whether the content entry carries a reference document.
    pub has_reference: bool,
}

/// Listing metadata for a subagent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubagentMeta {
    /// The document's file stem.
    pub id: String,
    /// The name the subagent is keyed by.
    pub name: String,
}

/// Full text of a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillContent {
    /// Text of `SKILL.md`.
    pub content: String,
    /// Text of `REFERENCE.md`; serializes as `null` when absent.
    pub reference: Option<String>,
}

/// Full text of a subagent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubagentContent {
    /// Text of the subagent document.
    pub content: String,
}

/// A JSON object whose keys keep the order they were inserted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedEntries<T>(pub Vec<(String, T)>);

impl<T> Default for OrderedEntries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> OrderedEntries<T> {
    /// Looks up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Serialize> Serialize for OrderedEntries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = OrderedEntries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of names to entries")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Content section of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleContent {
    /// Skill text keyed by name.
    pub skills: OrderedEntries<SkillContent>,
    /// Subagent text keyed by name.
    pub subagents: OrderedEntries<SubagentContent>,
    /// Generated catalog listing.
    pub catalog: String,
    /// The "when to use" document, verbatim.
    pub when_to_use: String,
    /// Generated overview.
    pub overview: String,
}

/// The complete bundle as persisted to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBundle {
    /// Skill metadata in build order.
    pub skills: Vec<SkillMeta>,
    /// Subagent metadata in build order.
    pub subagents: Vec<SubagentMeta>,
    /// Full text and generated documents.
    pub content: BundleContent,
}

impl From<&SkillRecord> for SkillMeta {
    fn from(record: &SkillRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            has_reference: record.has_reference(),
        }
    }
}

impl From<&SubagentRecord> for SubagentMeta {
    fn from(record: &SubagentRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }
}

impl ContentBundle {
    /// Assemble a bundle from a catalog and the generated documents.
    #[must_use]
    pub fn assemble(
        catalog: &Catalog,
        catalog_text: String,
        when_to_use: String,
        overview: String,
    ) -> Self {
        let skills = catalog.skills.iter().map(SkillMeta::from).collect();
        let subagents = catalog.subagents.iter().map(SubagentMeta::from).collect();

        let skill_content = catalog
            .skills
            .iter()
            .map(|s| {
                let entry = SkillContent {
                    content: s.content.clone(),
                    reference: s.reference.clone(),
                };
                (s.name.clone(), entry)
            })
            .collect();
        let subagent_content = catalog
            .subagents
            .iter()
            .map(|a| {
                let entry = SubagentContent {
                    content: a.content.clone(),
                };
                (a.name.clone(), entry)
            })
            .collect();

        Self {
            skills,
            subagents,
            content: BundleContent {
                skills: OrderedEntries(skill_content),
                subagents: OrderedEntries(subagent_content),
                catalog: catalog_text,
                when_to_use,
                overview,
            },
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Write the bundle to `artifact` and its digest to the sidecar path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if either file cannot be written.
    pub fn write_to(&self, artifact: &Path) -> Result<BuildOutput> {
        let bytes = self.to_canonical_bytes()?;

        if let Some(parent) = artifact.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(artifact, &bytes).map_err(|e| Error::io(artifact, e))?;

        let digest = sha256_hex(&bytes);
        let sidecar = sidecar_path(artifact);
        fs::write(&sidecar, sidecar_contents(&digest)).map_err(|e| Error::io(&sidecar, e))?;

        Ok(BuildOutput {
            artifact: artifact.to_path_buf(),
            sidecar,
            digest,
            bytes: bytes.len(),
            skills: self.skills.len(),
            subagents: self.subagents.len(),
        })
    }
}

/// What a build wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Path of the bundle artifact.
    pub artifact: PathBuf,
    /// Path of the digest sidecar.
    pub sidecar: PathBuf,
    /// Lowercase hex SHA-256 of the artifact bytes.
    pub digest: String,
    /// Size of the artifact in bytes.
    pub bytes: usize,
    /// Number of skills bundled.
    pub skills: usize,
    /// Number of subagents bundled.
    pub subagents: usize,
}
