//! Manifest parsing and rendering.
//!
//! A manifest is YAML frontmatter between `---` lines followed by a markdown
//! body. Rendering is deterministic: known fields come first in a fixed order,
//! unknown fields follow alphabetically, and strings are always quoted so YAML
//! never coerces them into booleans or numbers.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use crate::error::ParseError;
use crate::skill::{ALLOWED_FIELDS, FIELD_ORDER};

/// A parsed SKILL.md file.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Frontmatter fields by name.
    pub metadata: BTreeMap<String, Value>,
    /// Markdown after the closing delimiter, trimmed.
    pub body: String,
}

impl Manifest {
    /// The `name` field when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.string_field("name")
    }

    /// The `description` field when it is a string.
    pub fn description(&self) -> Option<&str> {
        self.string_field("description")
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        match self.metadata.get(key) {
            Some(Value::String(text)) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Parse a manifest, tolerating a leading UTF-8 BOM.
///
/// # Errors
///
/// Returns an error if:
/// - The content doesn't start with a `---` line
/// - The frontmatter isn't closed by a second `---` line
/// - The YAML is invalid or isn't a mapping
/// - Any key isn't a string
pub fn parse_manifest(content: &str) -> Result<Manifest, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (frontmatter, body) = split_frontmatter(content)?;

    match serde_yaml::from_str::<Value>(frontmatter)? {
        Value::Mapping(map) => Ok(Manifest {
            metadata: mapping_to_btreemap(map)?,
            body: body.trim().to_string(),
        }),
        // An empty frontmatter block parses as null.
        Value::Null => Ok(Manifest {
            metadata: BTreeMap::new(),
            body: body.trim().to_string(),
        }),
        _ => Err(ParseError::NotAMapping),
    }
}

fn split_frontmatter(content: &str) -> Result<(&str, &str), ParseError> {
    let mut lines = content.split_inclusive('\n');
    let Some(first_line) = lines.next() else {
        return Err(ParseError::MissingFrontmatter);
    };

    if trim_line_ending(first_line) != "---" {
        return Err(ParseError::MissingFrontmatter);
    }

    let mut offset = first_line.len();
    for line in lines {
        if trim_line_ending(line) == "---" {
            let frontmatter = &content[first_line.len()..offset];
            let body = &content[offset + line.len()..];
            return Ok((frontmatter, body));
        }
        offset += line.len();
    }

    Err(ParseError::UnclosedFrontmatter)
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn mapping_to_btreemap(map: Mapping) -> Result<BTreeMap<String, Value>, ParseError> {
    let mut result = BTreeMap::new();
    for (key, value) in map {
        let Value::String(key) = key else {
            return Err(ParseError::NonStringKey);
        };
        result.insert(key, value);
    }
    Ok(result)
}

/// Render metadata as a frontmatter block including both `---` delimiters.
pub fn format_frontmatter(metadata: &BTreeMap<String, Value>) -> Result<String, ParseError> {
    let mut lines = vec!["---".to_string()];

    let known = FIELD_ORDER
        .iter()
        .filter_map(|field| metadata.get_key_value(*field));
    let unknown = metadata
        .iter()
        .filter(|(key, _)| !ALLOWED_FIELDS.contains(&key.as_str()));

    for (key, value) in known.chain(unknown) {
        match value {
            Value::Mapping(map) if map.is_empty() => {}
            Value::Mapping(map) => {
                lines.push(format!("{}:", format_key(key)));
                for (sub_key, sub_value) in map {
                    let sub_key = match sub_key {
                        Value::String(text) => text.clone(),
                        other => scalar_text(other)?,
                    };
                    lines.push(format!(
                        "  {}: {}",
                        format_key(&sub_key),
                        format_scalar(sub_value)?
                    ));
                }
            }
            _ => lines.push(format!("{}: {}", format_key(key), format_scalar(value)?)),
        }
    }

    lines.push("---".to_string());
    Ok(lines.join("\n"))
}

/// Render a full manifest: frontmatter, a blank line, the body and a trailing newline.
pub fn render_manifest(manifest: &Manifest) -> Result<String, ParseError> {
    let mut out = format_frontmatter(&manifest.metadata)?;
    out.push_str("\n\n");
    out.push_str(manifest.body.trim_matches('\n'));
    out.push('\n');
    Ok(out)
}

fn scalar_text(value: &Value) -> Result<String, ParseError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(num) => Ok(num.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        _ => Err(ParseError::UnsupportedValueType),
    }
}

fn format_scalar(value: &Value) -> Result<String, ParseError> {
    match value {
        Value::String(text) => Ok(json_quote(text)),
        other => scalar_text(other),
    }
}

fn format_key(value: &str) -> String {
    let simple = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
    if simple {
        value.to_string()
    } else {
        json_quote(value)
    }
}

fn json_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
