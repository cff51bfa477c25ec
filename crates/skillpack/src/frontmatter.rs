//! Frontmatter extraction for skill and subagent documents.

use serde_yaml::Value;

/// Identity fields read from a document's frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// The declared `name`, if present and non-empty.
    pub name: Option<String>,
    /// The declared `description`, if present and non-empty.
    pub description: Option<String>,
    /// The document body after the frontmatter block.
    pub body: &'a str,
}

/// Parse the leading `---` frontmatter block of a markdown document.
///
/// Never fails. A document without a block yields `None` for both fields,
/// and each field resolves to `None` on its own when missing or unusable.
/// Valid YAML is read as a mapping; malformed YAML falls back to a
/// line-by-line scan for `name:` and `description:` keys.
pub fn parse_frontmatter(content: &str) -> Frontmatter<'_> {
    let Some((block, body)) = split_block(content) else {
        return Frontmatter {
            name: None,
            description: None,
            body: content,
        };
    };

    let (name, description) = match serde_yaml::from_str::<Value>(block) {
        Ok(yaml) => (yaml_field(&yaml, "name"), yaml_field(&yaml, "description")),
        Err(err) => {
            log::debug!("frontmatter is not valid YAML, scanning lines: {err}");
            (scan_field(block, "name"), scan_field(block, "description"))
        }
    };

    Frontmatter {
        name,
        description,
        body,
    }
}

/// Returns `(block, body)` when the content opens with a closed `---` block.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let (opener, line_ending) = if content.starts_with("---\r\n") {
        ("---\r\n", "\r\n")
    } else if content.starts_with("---\n") {
        ("---\n", "\n")
    } else {
        return None;
    };

    let after_opener = &content[opener.len()..];
    let empty_closer = format!("---{line_ending}");
    let closer = format!("{line_ending}---{line_ending}");
    let closer_eof = format!("{line_ending}---");

    if after_opener.starts_with(&empty_closer) {
        Some(("", &after_opener[empty_closer.len()..]))
    } else if let Some(pos) = after_opener.find(&closer) {
        Some((&after_opener[..pos], &after_opener[pos + closer.len()..]))
    } else if after_opener.ends_with(&closer_eof) {
        Some((&after_opener[..after_opener.len() - closer_eof.len()], ""))
    } else if after_opener == "---" {
        Some(("", ""))
    } else {
        None
    }
}

fn yaml_field(yaml: &Value, key: &str) -> Option<String> {
    let raw = match yaml.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    clean_value(&raw)
}

fn scan_field(block: &str, key: &str) -> Option<String> {
    block.lines().find_map(|line| {
        let rest = line.strip_prefix(key)?.strip_prefix(':')?;
        clean_value(rest)
    })
}

/// Trim whitespace and strip one pair of matching surrounding quotes.
fn clean_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|s| s.strip_suffix(*q))
        })
        .unwrap_or(trimmed)
        .trim();

    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_description() {
        let content = "---\nname: bar\ndescription: \"does bar\"\n---\n# Body\n";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.name.as_deref(), Some("bar"));
        assert_eq!(fm.description.as_deref(), Some("does bar"));
        assert_eq!(fm.body, "# Body\n");
    }

    #[test]
    fn returns_none_without_frontmatter() {
        let content = "# Just Markdown\nname: not-frontmatter";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.name, None);
        assert_eq!(fm.description, None);
        assert_eq!(fm.body, content);
    }

    #[test]
    fn unclosed_block_is_not_frontmatter() {
        let content = "---\nname: dangling\n# Body";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.name, None);
        assert_eq!(fm.body, content);
    }

    #[test]
    fn handles_empty_frontmatter() {
        let fm = parse_frontmatter("---\n---\nBody content");
        assert_eq!(fm.name, None);
        assert_eq!(fm.description, None);
        assert_eq!(fm.body, "Body content");
    }

    #[test]
    fn description_without_name() {
        let fm = parse_frontmatter("---\ndescription: only this\n---\n");
        assert_eq!(fm.name, None);
        assert_eq!(fm.description.as_deref(), Some("only this"));
    }

    #[test]
    fn name_without_description() {
        let fm = parse_frontmatter("---\nname: lonely\n---\n");
        assert_eq!(fm.name.as_deref(), Some("lonely"));
        assert_eq!(fm.description, None);
    }

    #[test]
    fn malformed_yaml_falls_back_to_line_scan() {
        let content = "---\nname: 'quoted'\ndescription: uses: colons: freely\n---\nBody";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.name.as_deref(), Some("quoted"));
        assert_eq!(fm.description.as_deref(), Some("uses: colons: freely"));
        assert_eq!(fm.body, "Body");
    }

    #[test]
    fn strips_quotes_left_inside_yaml_strings() {
        let content = "---\nname: '\"nested\"'\ndescription: '  padded  '\n---\n";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.name.as_deref(), Some("nested"));
        assert_eq!(fm.description.as_deref(), Some("padded"));
    }

    #[test]
    fn empty_values_resolve_to_none() {
        let fm = parse_frontmatter("---\nname: \"\"\ndescription:\n---\n");
        assert_eq!(fm.name, None);
        assert_eq!(fm.description, None);
    }

    #[test]
    fn non_string_scalars_become_strings() {
        let fm = parse_frontmatter("---\nname: 42\ndescription: true\n---\n");
        assert_eq!(fm.name.as_deref(), Some("42"));
        assert_eq!(fm.description.as_deref(), Some("true"));
    }

    #[test]
    fn nested_values_are_ignored() {
        let fm = parse_frontmatter("---\nname:\n  first: a\ndescription: kept\n---\n");
        assert_eq!(fm.name, None);
        assert_eq!(fm.description.as_deref(), Some("kept"));
    }

    #[test]
    fn handles_crlf_line_endings() {
        let fm = parse_frontmatter("---\r\nname: crlf\r\n---\r\nBody");
        assert_eq!(fm.name.as_deref(), Some("crlf"));
        assert_eq!(fm.body, "Body");
    }

    #[test]
    fn preserves_horizontal_rules_in_body() {
        let fm = parse_frontmatter("---\nname: test\n---\n# Title\n\n---\n\nMore content");
        assert_eq!(fm.name.as_deref(), Some("test"));
        assert!(fm.body.contains("---"));
        assert!(fm.body.contains("More content"));
    }

    #[test]
    fn handles_frontmatter_at_eof() {
        let fm = parse_frontmatter("---\nname: test\n---");
        assert_eq!(fm.name.as_deref(), Some("test"));
        assert_eq!(fm.body, "");
    }

    #[test]
    fn folded_description_is_read_from_yaml() {
        let content = "---\nname: folded\ndescription: >\n  first line\n  second line\n---\n";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.description.as_deref(), Some("first line second line"));
    }
}
