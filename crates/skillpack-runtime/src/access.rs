//! List, get and compose over a loaded index.
//!
//! Lookups try the identifier first, then the display name. A miss is
//! always [`Error::NotFound`]; nothing partial is ever returned.

use std::fmt::Write as _;

use skillpack::{SkillMeta, SubagentMeta};

use crate::index::{ContentIndex, SkillEntry, SubagentEntry};
use crate::{EntryKind, Error, Result};

impl ContentIndex {
    /// Skill metadata in build order.
    #[must_use]
    pub fn list_skills(&self) -> &[SkillMeta] {
        self.skill_meta()
    }

    /// Subagent metadata in build order.
    #[must_use]
    pub fn list_subagents(&self) -> &[SubagentMeta] {
        self.subagent_meta()
    }

    /// Look up a skill by identifier or name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches `key`.
    pub fn get_skill(&self, key: &str) -> Result<&SkillEntry> {
        self.resolve_skill(key)
            .ok_or_else(|| Error::not_found(EntryKind::Skill, key))
    }

    /// Look up a subagent by identifier or name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches `key`.
    pub fn get_subagent(&self, key: &str) -> Result<&SubagentEntry> {
        self.resolve_subagent(key)
            .ok_or_else(|| Error::not_found(EntryKind::Subagent, key))
    }

    /// Combine a skill's instructions with a caller's request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches `key`.
    pub fn compose_skill(&self, key: &str, message: &str) -> Result<String> {
        self.get_skill(key)
            .map(|skill| compose_skill_text(skill, message))
    }

    /// Combine a subagent's instructions with a caller's task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches `key`.
    pub fn compose_subagent(&self, key: &str, message: &str) -> Result<String> {
        self.get_subagent(key)
            .map(|agent| compose_subagent_text(agent, message))
    }
}

fn compose_skill_text(skill: &SkillEntry, message: &str) -> String {
    let mut out = format!(
        "Use the \"{}\" skill to handle the request below.\n\n<skill>\n{}\n</skill>\n\n",
        skill.name, skill.content
    );
    if let Some(reference) = &skill.reference {
        let _ = write!(out, "<reference>\n{reference}\n</reference>\n\n");
    }
    let _ = write!(out, "Request: {message}");
    out
}

fn compose_subagent_text(agent: &SubagentEntry, message: &str) -> String {
    format!(
        concat!(
            "Act as the \"{}\" subagent and carry out the task below.\n\n",
            "<subagent>\n{}\n</subagent>\n\nTask: {message}",
        ),
        agent.name,
        agent.content,
        message = message
    )
}
