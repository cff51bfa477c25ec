//! Resource, tool and prompt surfaces for a protocol transport.
//!
//! These types carry no transport state. A server wraps them in whatever
//! protocol framing it speaks and maps [`Error::NotFound`] to its own
//! "not found" response.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::index::ContentIndex;
use crate::{EntryKind, Error, Result};

const MARKDOWN: &str = "text/markdown";
const SKILL_SCHEME: &str = "skill://";
const SUBAGENT_SCHEME: &str = "subagent://";
const DOCS_SCHEME: &str = "skillpack://";
const REFERENCE_SUFFIX: &str = "/reference";

/// A readable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mime_type: &'static str,
}

/// The text of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// A callable tool and its JSON input schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// A prompt template argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// A prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

/// A rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptOutput {
    pub description: String,
    pub text: String,
}

const DOCUMENTS: [(&str, &str); 3] = [
    ("catalog", "Every bundled skill and subagent"),
    ("when-to-use", "Guidance on when to reach for a skill"),
    ("overview", "What this server provides"),
];

/// Every resource the index can serve.
#[must_use]
pub fn list_resources(index: &ContentIndex) -> Vec<ResourceDescriptor> {
    let mut resources: Vec<_> = DOCUMENTS
        .iter()
        .map(|(name, description)| ResourceDescriptor {
            uri: format!("{DOCS_SCHEME}{name}"),
            name: (*name).to_string(),
            description: Some((*description).to_string()),
            mime_type: MARKDOWN,
        })
        .collect();

    for skill in index.list_skills() {
        resources.push(ResourceDescriptor {
            uri: format!("{SKILL_SCHEME}{}", skill.name),
            name: skill.name.clone(),
            description: index
                .skill_by_name(&skill.name)
                .and_then(|entry| entry.description.clone()),
            mime_type: MARKDOWN,
        });
        if skill.has_reference {
            resources.push(ResourceDescriptor {
                uri: format!("{SKILL_SCHEME}{}{REFERENCE_SUFFIX}", skill.name),
                name: format!("{} reference", skill.name),
                description: None,
                mime_type: MARKDOWN,
            });
        }
    }
    for agent in index.list_subagents() {
        resources.push(ResourceDescriptor {
            uri: format!("{SUBAGENT_SCHEME}{}", agent.name),
            name: agent.name.clone(),
            description: index
                .subagent_by_name(&agent.name)
                .and_then(|entry| entry.description.clone()),
            mime_type: MARKDOWN,
        });
    }
    resources
}

/// Read a resource by URI.
///
/// Entry URIs carry the name an entry is listed under, so they resolve by
/// name only.
///
/// # Errors
///
/// Returns [`Error::InvalidUri`] for unknown schemes and
/// [`Error::NotFound`] when the URI names nothing in the index.
pub fn read_resource(index: &ContentIndex, uri: &str) -> Result<ResourceContents> {
    let text = if let Some(key) = uri.strip_prefix(SKILL_SCHEME) {
        let (name, reference) = match key.strip_suffix(REFERENCE_SUFFIX) {
            Some(name) => (name, true),
            None => (key, false),
        };
        let skill = index
            .skill_by_name(name)
            .ok_or_else(|| Error::not_found(EntryKind::Skill, name))?;
        if reference {
            skill
                .reference
                .clone()
                .ok_or_else(|| Error::not_found(EntryKind::Resource, uri))?
        } else {
            skill.content.clone()
        }
    } else if let Some(name) = uri.strip_prefix(SUBAGENT_SCHEME) {
        index
            .subagent_by_name(name)
            .ok_or_else(|| Error::not_found(EntryKind::Subagent, name))?
            .content
            .clone()
    } else if let Some(doc) = uri.strip_prefix(DOCS_SCHEME) {
        match doc {
            "catalog" => index.catalog().to_string(),
            "when-to-use" => index.when_to_use().to_string(),
            "overview" => index.overview().to_string(),
            _ => return Err(Error::not_found(EntryKind::Resource, uri)),
        }
    } else {
        return Err(Error::InvalidUri(uri.to_string()));
    };

    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: MARKDOWN,
        text,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NameArgs {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComposeArgs {
    name: String,
    message: String,
}

fn parse_args<T: for<'de> Deserialize<'de>>(name: &str, args: Value) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|source| Error::InvalidArguments {
        name: name.to_string(),
        source,
    })
}

fn name_schema(what: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": format!("{what} identifier or name")
            }
        },
        "required": ["name"],
        "additionalProperties": false
    })
}

/// The tools this server provides.
#[must_use]
pub fn list_tools() -> Vec<ToolDescriptor> {
    let no_args = json!({ "type": "object", "properties": {}, "additionalProperties": false });
    vec![
        ToolDescriptor {
            name: "list_skills",
            description: "List every bundled skill",
            input_schema: no_args.clone(),
        },
        ToolDescriptor {
            name: "list_subagents",
            description: "List every bundled subagent",
            input_schema: no_args,
        },
        ToolDescriptor {
            name: "get_skill",
            description: "Return a skill's instructions and reference text",
            input_schema: name_schema("Skill"),
        },
        ToolDescriptor {
            name: "get_subagent",
            description: "Return a subagent's instructions",
            input_schema: name_schema("Subagent"),
        },
    ]
}

/// Invoke a tool with JSON arguments.
///
/// # Errors
///
/// Returns [`Error::UnknownTool`], [`Error::InvalidArguments`], or
/// [`Error::NotFound`] when the requested entry does not exist.
pub fn call_tool(index: &ContentIndex, name: &str, args: Value) -> Result<Value> {
    match name {
        "list_skills" => {
            parse_args::<NoArgs>(name, args)?;
            Ok(json!({ "skills": index.list_skills() }))
        }
        "list_subagents" => {
            parse_args::<NoArgs>(name, args)?;
            Ok(json!({ "subagents": index.list_subagents() }))
        }
        "get_skill" => {
            let NameArgs { name: key } = parse_args(name, args)?;
            let skill = index.get_skill(&key)?;
            Ok(json!({
                "id": skill.id,
                "name": skill.name,
                "description": skill.description,
                "content": skill.content,
                "reference": skill.reference,
            }))
        }
        "get_subagent" => {
            let NameArgs { name: key } = parse_args(name, args)?;
            let agent = index.get_subagent(&key)?;
            Ok(json!({
                "id": agent.id,
                "name": agent.name,
                "description": agent.description,
                "content": agent.content,
            }))
        }
        _ => Err(Error::UnknownTool(name.to_string())),
    }
}

fn compose_arguments(what: &'static str) -> Vec<PromptArgument> {
    vec![
        PromptArgument {
            name: "name",
            description: what,
            required: true,
        },
        PromptArgument {
            name: "message",
            description: "The request to hand over",
            required: true,
        },
    ]
}

/// The prompts this server provides.
#[must_use]
pub fn list_prompts() -> Vec<PromptDescriptor> {
    vec![
        PromptDescriptor {
            name: "use_skill",
            description: "Apply a skill to a request",
            arguments: compose_arguments("Skill identifier or name"),
        },
        PromptDescriptor {
            name: "use_subagent",
            description: "Delegate a task to a subagent",
            arguments: compose_arguments("Subagent identifier or name"),
        },
    ]
}

/// Render a prompt with JSON arguments.
///
/// # Errors
///
/// Returns [`Error::UnknownPrompt`], [`Error::InvalidArguments`], or
/// [`Error::NotFound`] when the requested entry does not exist.
pub fn get_prompt(index: &ContentIndex, name: &str, args: Value) -> Result<PromptOutput> {
    match name {
        "use_skill" => {
            let ComposeArgs { name: key, message } = parse_args(name, args)?;
            let text = index.compose_skill(&key, &message)?;
            Ok(PromptOutput {
                description: format!("Apply skill {key}"),
                text,
            })
        }
        "use_subagent" => {
            let ComposeArgs { name: key, message } = parse_args(name, args)?;
            let text = index.compose_subagent(&key, &message)?;
            Ok(PromptOutput {
                description: format!("Delegate to subagent {key}"),
                text,
            })
        }
        _ => Err(Error::UnknownPrompt(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillpack::{BuildConfig, build};
    use std::fs;
    use tempfile::TempDir;

    fn index() -> (TempDir, ContentIndex) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("skills/foo")).unwrap();
        fs::write(
            root.join("skills/foo/SKILL.md"),
            "---\nname: bar\ndescription: does bar\n---\nBar body",
        )
        .unwrap();
        fs::write(root.join("skills/foo/REFERENCE.md"), "Bar ref").unwrap();
        fs::create_dir_all(root.join("agents")).unwrap();
        fs::write(root.join("agents/helper.md"), "Helper body").unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/WHEN_TO_USE.md"), "When stuck.").unwrap();

        let output = build(&BuildConfig::with_root(root)).unwrap();
        let index = crate::load(&output.artifact).unwrap();
        (tmp, index)
    }

    #[test]
    fn lists_documents_skills_references_and_subagents() {
        let (_tmp, index) = index();
        let uris: Vec<_> = list_resources(&index).into_iter().map(|r| r.uri).collect();
        assert_eq!(
            uris,
            vec![
                "skillpack://catalog",
                "skillpack://when-to-use",
                "skillpack://overview",
                "skill://bar",
                "skill://bar/reference",
                "subagent://helper",
            ]
        );
    }

    #[test]
    fn reads_resources_by_uri() {
        let (_tmp, index) = index();
        let read = |uri: &str| read_resource(&index, uri).unwrap().text;
        assert_eq!(read("skill://bar"), index.get_skill("bar").unwrap().content);
        assert_eq!(read("skill://bar/reference"), "Bar ref");
        assert_eq!(read("subagent://helper"), "Helper body");
        assert_eq!(read("skillpack://when-to-use"), "When stuck.");
        assert!(read("skillpack://catalog").contains("**bar**"));
    }

    #[test]
    fn resource_descriptors_carry_descriptions() {
        let (_tmp, index) = index();
        let resources = list_resources(&index);
        let skill = resources.iter().find(|r| r.uri == "skill://bar").unwrap();
        assert_eq!(skill.description.as_deref(), Some("does bar"));
        let agent = resources.iter().find(|r| r.uri == "subagent://helper").unwrap();
        assert_eq!(agent.description, None);
    }

    #[test]
    fn resource_uris_resolve_by_name_not_identifier() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("skills/alpha")).unwrap();
        fs::create_dir_all(root.join("skills/beta")).unwrap();
        fs::write(root.join("skills/alpha/SKILL.md"), "---\nname: beta\n---\nAlpha").unwrap();
        fs::write(root.join("skills/alpha/REFERENCE.md"), "Alpha ref").unwrap();
        fs::write(root.join("skills/beta/SKILL.md"), "---\nname: gamma\n---\nBeta").unwrap();
        let output = build(&BuildConfig::with_root(root)).unwrap();
        let index = crate::load(&output.artifact).unwrap();

        let read = |uri: &str| read_resource(&index, uri);
        assert_eq!(read("skill://beta").unwrap().text, "---\nname: beta\n---\nAlpha");
        assert_eq!(read("skill://gamma").unwrap().text, "---\nname: gamma\n---\nBeta");
        assert_eq!(read("skill://beta/reference").unwrap().text, "Alpha ref");
        assert!(read("skill://alpha").unwrap_err().is_not_found());
        assert!(read("skill://gamma/reference").unwrap_err().is_not_found());
    }

    #[test]
    fn subagent_uris_resolve_by_name_not_identifier() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("agents")).unwrap();
        fs::write(tmp.path().join("agents/helper.md"), "---\nname: Helper\n---\nH").unwrap();
        let output = build(&BuildConfig::with_root(tmp.path())).unwrap();
        let index = crate::load(&output.artifact).unwrap();

        assert!(read_resource(&index, "subagent://Helper").is_ok());
        assert!(read_resource(&index, "subagent://helper").unwrap_err().is_not_found());
    }

    #[test]
    fn resource_errors() {
        let (_tmp, index) = index();
        assert!(read_resource(&index, "skill://missing").unwrap_err().is_not_found());
        assert!(read_resource(&index, "skillpack://nothing").unwrap_err().is_not_found());
        assert!(matches!(
            read_resource(&index, "https://example.com").unwrap_err(),
            Error::InvalidUri(_)
        ));
    }

    #[test]
    fn missing_reference_is_not_found() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("skills/solo")).unwrap();
        fs::write(tmp.path().join("skills/solo/SKILL.md"), "Solo").unwrap();
        let output = build(&BuildConfig::with_root(tmp.path())).unwrap();
        let index = crate::load(&output.artifact).unwrap();

        assert!(read_resource(&index, "skill://solo/reference").unwrap_err().is_not_found());
    }

    #[test]
    fn tools_return_listing_and_content() {
        let (_tmp, index) = index();
        let listing = call_tool(&index, "list_skills", Value::Null).unwrap();
        assert_eq!(listing["skills"][0]["id"], "foo");
        assert_eq!(listing["skills"][0]["hasReference"], true);

        let skill = call_tool(&index, "get_skill", json!({ "name": "foo" })).unwrap();
        assert_eq!(skill["name"], "bar");
        assert_eq!(skill["reference"], "Bar ref");

        let agent = call_tool(&index, "get_subagent", json!({ "name": "helper" })).unwrap();
        assert_eq!(agent["content"], "Helper body");
    }

    #[test]
    fn tool_errors() {
        let (_tmp, index) = index();
        let missing = call_tool(&index, "get_skill", json!({ "name": "nope" }));
        assert!(missing.unwrap_err().is_not_found());
        assert!(matches!(
            call_tool(&index, "get_skill", json!({})).unwrap_err(),
            Error::InvalidArguments { .. }
        ));
        assert!(matches!(
            call_tool(&index, "delete_skill", Value::Null).unwrap_err(),
            Error::UnknownTool(_)
        ));
    }

    #[test]
    fn list_tools_reject_arguments() {
        let (_tmp, index) = index();
        for tool in ["list_skills", "list_subagents"] {
            assert!(call_tool(&index, tool, json!({})).is_ok());
            assert!(matches!(
                call_tool(&index, tool, json!({ "name": "x" })).unwrap_err(),
                Error::InvalidArguments { .. }
            ));
            assert!(matches!(
                call_tool(&index, tool, json!("str")).unwrap_err(),
                Error::InvalidArguments { .. }
            ));
        }
    }

    #[test]
    fn every_listed_tool_is_callable() {
        let (_tmp, index) = index();
        for tool in list_tools() {
            let err = call_tool(&index, tool.name, json!({ "name": "nope" }));
            assert!(!matches!(err, Err(Error::UnknownTool(_))), "{}", tool.name);
        }
    }

    #[test]
    fn prompts_compose_content_and_message() {
        let (_tmp, index) = index();
        let prompt = get_prompt(
            &index,
            "use_skill",
            json!({ "name": "bar", "message": "do it" }),
        )
        .unwrap();
        assert_eq!(prompt.text, index.compose_skill("bar", "do it").unwrap());

        let prompt = get_prompt(
            &index,
            "use_subagent",
            json!({ "name": "helper", "message": "help" }),
        )
        .unwrap();
        assert!(prompt.text.ends_with("Task: help"));
        assert_eq!(list_prompts().len(), 2);
    }

    #[test]
    fn prompt_errors() {
        let (_tmp, index) = index();
        let missing = get_prompt(&index, "use_skill", json!({ "name": "x", "message": "m" }));
        assert!(missing.unwrap_err().is_not_found());
        assert!(matches!(
            get_prompt(&index, "use_skill", json!({ "name": "bar" })).unwrap_err(),
            Error::InvalidArguments { .. }
        ));
        assert!(matches!(
            get_prompt(&index, "nope", Value::Null).unwrap_err(),
            Error::UnknownPrompt(_)
        ));
    }
}
