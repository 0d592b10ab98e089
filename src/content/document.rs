//! Raw source document loading.
//!
//! Markdown/MDX documents carry YAML frontmatter between `---` delimiter
//! lines; `.yml` documents are YAML throughout. Either way the result is a
//! single `serde_yaml::Value` handed to schema validation.

use anyhow::{Context, Result, bail};
use serde_yaml::Value;
use std::{fs, path::Path};

/// Frontmatter delimiter line
const DELIMITER: &str = "---";

/// Read a source document and extract its structured data.
///
/// Dispatch is by extension: `.yml`/`.yaml` parse whole, everything else is
/// treated as markdown with frontmatter.
pub fn read_document(path: &Path) -> Result<Value> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let extension = path.extension().and_then(|e| e.to_str());
    let value = match extension {
        Some("yml" | "yaml") => serde_yaml::from_str(&source)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        _ => parse_frontmatter(&source)
            .with_context(|| format!("Invalid frontmatter in {}", path.display()))?,
    };

    Ok(normalize(value))
}

/// Extract the YAML frontmatter block from a markdown document.
///
/// A document without a leading `---` line has no frontmatter and yields an
/// empty mapping, which then fails validation on the first required field.
pub fn parse_frontmatter(source: &str) -> Result<Value> {
    let Some(rest) = source.strip_prefix(DELIMITER) else {
        return Ok(empty_mapping());
    };

    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let Some(rest) = rest.strip_prefix('\n') else {
        // "---something": a horizontal rule or stray dashes, not frontmatter
        return Ok(empty_mapping());
    };

    let Some(end) = find_closing_delimiter(rest) else {
        bail!("unterminated frontmatter block");
    };

    let value = serde_yaml::from_str(&rest[..end])?;
    Ok(normalize(value))
}

/// Byte offset of the line containing the closing `---`, if any.
fn find_closing_delimiter(body: &str) -> Option<usize> {
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Empty frontmatter parses as `Null`; collapse that to an empty mapping so
/// validation reports missing fields instead of a type mismatch.
fn normalize(value: Value) -> Value {
    match value {
        Value::Null => empty_mapping(),
        other => other,
    }
}

fn empty_mapping() -> Value {
    Value::Mapping(serde_yaml::Mapping::new())
}
