//! YAML front matter extraction for content files.
//!
//! A content file carries front matter when its first line is exactly `---`.
//! The block runs until the next line that is exactly `---`; everything in
//! between is YAML. Only the `nav_title` key matters to navigation.

use serde_yaml::Value;

/// Front matter key holding the navigation title.
const TITLE_KEY: &str = "nav_title";

/// Block delimiter line.
const DELIMITER: &str = "---";

/// Fields read from a content file's front matter.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    /// Navigation title, if the file declares one.
    pub nav_title: Option<String>,
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// Opening delimiter without a closing one.
    #[error("front matter block is not terminated by a `---` line")]
    Unterminated,
    /// The block is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The block is valid YAML but not a key-value mapping.
    #[error("front matter must be a mapping")]
    NotMapping,
}

/// Parse the front matter of a content file.
///
/// Files without front matter, and empty blocks, yield [`FrontMatter::default`].
///
/// # Errors
///
/// Returns [`FrontMatterError`] if the block is unterminated, is not valid
/// YAML, or is not a mapping.
pub fn parse_front_matter(content: &str) -> Result<FrontMatter, FrontMatterError> {
    let Some(yaml) = extract_block(content)? else {
        return Ok(FrontMatter::default());
    };
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let mapping = match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(FrontMatter::default()),
        _ => return Err(FrontMatterError::NotMapping),
    };

    let nav_title = mapping.get(TITLE_KEY).and_then(scalar_to_string);
    Ok(FrontMatter { nav_title })
}

/// Slice out the YAML between the delimiters, if the content opens with one.
fn extract_block(content: &str) -> Result<Option<&str>, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if first.trim_end() != DELIMITER {
        return Ok(None);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Ok(Some(&content[start..offset]));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

/// Render a scalar title value as a string.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            tracing::warn!("Ignoring non-scalar nav_title in front matter");
            None
        }
    }
}
