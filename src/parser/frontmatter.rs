//! Flat front matter parsing.
//!
//! Todo files may open with a `---` delimited block of `key: value`
//! lines. Only flat scalars and single-line `[a, b]` lists are understood;
//! anything else is skipped rather than rejected.

use std::collections::HashMap;

const DELIMITER: &str = "---";

/// A front matter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontValue {
    Scalar(String),
    List(Vec<String>),
}

impl FrontValue {
    /// Scalar value, if this is one.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FrontValue::Scalar(s) => Some(s),
            FrontValue::List(_) => None,
        }
    }

    /// Value as a list; a scalar becomes a one-element list, an empty
    /// scalar an empty one.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FrontValue::List(items) => items.clone(),
            FrontValue::Scalar(s) if s.is_empty() => Vec::new(),
            FrontValue::Scalar(s) => vec![s.clone()],
        }
    }
}

/// Parsed front matter keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: HashMap<String, FrontValue>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.fields.get(key)
    }

    /// Scalar field, or `default` when absent or a list.
    pub fn scalar_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(FrontValue::as_scalar)
            .unwrap_or(default)
            .to_string()
    }

    /// List field, empty when absent.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key).map(FrontValue::to_list).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Byte range of the front matter body, and the offset just past the
/// closing delimiter.
fn locate(content: &str) -> Option<(usize, usize)> {
    if !content.starts_with(DELIMITER) {
        return None;
    }

    let start = DELIMITER.len();
    content[start..]
        .find(DELIMITER)
        .map(|pos| (start + pos, start + pos + DELIMITER.len()))
}

/// Parse the front matter block at the top of `content`.
///
/// Missing or unterminated front matter yields an empty mapping.
pub fn parse(content: &str) -> FrontMatter {
    let Some((end, _)) = locate(content) else {
        return FrontMatter::default();
    };

    let mut fields = HashMap::new();

    for line in content[DELIMITER.len()..end].trim().lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };

        let value = value.trim();
        let parsed = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            Some(inner) => FrontValue::List(
                inner
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| strip_quotes(item).to_string())
                    .collect(),
            ),
            None => FrontValue::Scalar(strip_quotes(value).to_string()),
        };

        fields.insert(key.trim().to_string(), parsed);
    }

    FrontMatter { fields }
}

/// Content with the front matter block removed and surrounding
/// whitespace trimmed. Content without front matter is returned as is.
pub fn strip(content: &str) -> &str {
    match locate(content) {
        Some((_, body_start)) => content[body_start..].trim(),
        None => content,
    }
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_and_lists() {
        let fm = parse(
            "---\nstatus: in_progress\npriority: \"high\"\ntags: [backend, 'api', \"db\"]\n---\n# Title\n",
        );

        assert_eq!(fm.scalar_or("status", "pending"), "in_progress");
        assert_eq!(fm.scalar_or("priority", "normal"), "high");
        assert_eq!(fm.list("tags"), vec!["backend", "api", "db"]);
    }

    #[test]
    fn test_value_split_on_first_colon() {
        let fm = parse("---\nlink: https://example.com/a:b\n---\n");
        assert_eq!(fm.scalar_or("link", ""), "https://example.com/a:b");
    }

    #[test]
    fn test_empty_list_items_dropped() {
        let fm = parse("---\nblocks: [web, , api,]\nblocked_by: []\n---\n");
        assert_eq!(fm.list("blocks"), vec!["web", "api"]);
        assert!(fm.list("blocked_by").is_empty());
        assert_eq!(fm.get("blocked_by"), Some(&FrontValue::List(Vec::new())));
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let fm = parse("---\njust some text\nstatus: pending\n---\n");
        assert_eq!(fm.scalar_or("status", "x"), "pending");
        assert!(fm.get("just some text").is_none());
    }

    #[test]
    fn test_no_front_matter() {
        assert!(parse("# Heading\nstatus: done\n").is_empty());
        // Delimiter must be at offset 0
        assert!(parse("\n---\nstatus: done\n---\n").is_empty());
    }

    #[test]
    fn test_unterminated_front_matter() {
        assert!(parse("---\nstatus: done\n# Heading\n").is_empty());
        assert_eq!(strip("---\nstatus: done\n"), "---\nstatus: done\n");
    }

    #[test]
    fn test_scalar_or_defaults_for_lists() {
        let fm = parse("---\nstatus: [a, b]\n---\n");
        assert_eq!(fm.scalar_or("status", "pending"), "pending");
    }

    #[test]
    fn test_scalar_as_list() {
        let fm = parse("---\nblocks: web\nblocked_by:\n---\n");
        assert_eq!(fm.list("blocks"), vec!["web"]);
        assert!(fm.list("blocked_by").is_empty());
    }

    #[test]
    fn test_strip_removes_block() {
        let content = "---\nstatus: pending\n---\n\n## Do it\nbody\n";
        assert_eq!(strip(content), "## Do it\nbody");
        assert_eq!(strip("# Plain\n"), "# Plain\n");
    }
}
