//! Todo file parsing.
//!
//! Turns one markdown todo file into a [`TodoItem`]: front matter supplies
//! status, priority, tags and declared relationships; the first heading
//! supplies the title; inline `[BLOCKS:...]` / `[BLOCKED-BY:...]` tags add
//! relationships found anywhere in the file.

pub mod frontmatter;

use crate::models::TodoItem;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::SystemTime;
use tracing::debug;

const SECONDS_PER_DAY: i64 = 86_400;

/// Inline relationship tags found in a todo body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineTags {
    pub blocks: Vec<String>,
    pub blocked_by: Vec<String>,
}

/// Parse a todo file on disk.
///
/// Returns `None` when the file cannot be read; callers drop such files
/// from the batch.
pub fn parse_todo_file(path: &Path, project: &str) -> Option<TodoItem> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Skipping unreadable todo {}: {}", path.display(), e);
            return None;
        }
    };

    let age_days = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|modified| age_in_days(modified, Utc::now()))
        .unwrap_or(0);

    Some(parse_todo_content(&content, path, project, age_days))
}

/// Build a [`TodoItem`] from file content already in memory.
pub fn parse_todo_content(content: &str, path: &Path, project: &str, age_days: u64) -> TodoItem {
    let front = frontmatter::parse(content);
    let inline = parse_inline_tags(content);

    let mut blocks = front.list("blocks");
    blocks.extend(inline.blocks);

    let mut blocked_by = front.list("blocked_by");
    blocked_by.extend(inline.blocked_by);

    TodoItem {
        project: project.to_string(),
        file_path: path.to_path_buf(),
        title: extract_title(content, path),
        status: front.scalar_or("status", "pending"),
        priority: front.scalar_or("priority", "normal"),
        age_days,
        blocks,
        blocked_by,
        tags: front.list("tags"),
    }
}

/// Whole days between `modified` and `now`; zero for future timestamps.
pub fn age_in_days(modified: SystemTime, now: DateTime<Utc>) -> u64 {
    let modified: DateTime<Utc> = modified.into();
    let elapsed = now.signed_duration_since(modified).num_seconds();
    (elapsed.max(0) / SECONDS_PER_DAY) as u64
}

/// First markdown heading after the front matter, or a title made from
/// the file name.
pub fn extract_title(content: &str, path: &Path) -> String {
    let body = frontmatter::strip(content);

    for line in body.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            return line.trim_start_matches('#').trim().to_string();
        }
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    title_case(&stem.replace(['-', '_'], " "))
}

/// Capitalize the first letter of every word and lowercase the rest.
/// A word starts after any non-alphabetic character.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

fn blocks_pattern() -> &'static Regex {
    static BLOCKS_RE: OnceLock<Regex> = OnceLock::new();
    BLOCKS_RE.get_or_init(|| Regex::new(r"\[BLOCKS:([^\]]+)\]").expect("valid blocks regex"))
}

fn blocked_by_pattern() -> &'static Regex {
    static BLOCKED_BY_RE: OnceLock<Regex> = OnceLock::new();
    BLOCKED_BY_RE
        .get_or_init(|| Regex::new(r"\[BLOCKED-BY:([^\]]+)\]").expect("valid blocked-by regex"))
}

/// Scan the whole content, front matter included, for relationship tags.
pub fn parse_inline_tags(content: &str) -> InlineTags {
    let capture_all = |re: &Regex| -> Vec<String> {
        re.captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    };

    InlineTags {
        blocks: capture_all(blocks_pattern()),
        blocked_by: capture_all(blocked_by_pattern()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoState;
    use std::fs::File;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn todo_path(name: &str) -> PathBuf {
        PathBuf::from("/work/api/.claude/work/todos").join(name)
    }

    #[test]
    fn test_front_matter_urgent() {
        let content = "---\nstatus: in_progress\npriority: urgent\n---\n# Rotate credentials\n";
        let todo = parse_todo_content(content, &todo_path("rotate.md"), "api", 1);

        assert_eq!(todo.status, "in_progress");
        assert_eq!(todo.priority, "urgent");
        assert_eq!(todo.title, "Rotate credentials");
        assert!(todo.blocks.is_empty());
        assert!(todo.blocked_by.is_empty());
        assert_eq!(todo.state(), TodoState::Urgent);
    }

    #[test]
    fn test_heading_and_inline_blocker() {
        let content = "Some intro text\n\n## Fix the thing\n\nWaiting on [BLOCKED-BY:infra#vpc] first.\n";
        let todo = parse_todo_content(content, &todo_path("fix.md"), "api", 0);

        assert_eq!(todo.title, "Fix the thing");
        assert_eq!(todo.blocked_by, vec!["infra#vpc"]);
        assert_eq!(todo.status, "pending");
        assert_eq!(todo.priority, "normal");
        assert_eq!(todo.state(), TodoState::Blocked);
    }

    #[test]
    fn test_declared_then_inline_without_dedup() {
        let content = "---\nblocks: [web, mobile]\nblocked_by: [db]\n---\n# Ship v2\n\
            [BLOCKS:web] [BLOCKS: docs ] [BLOCKED-BY:db]\n";
        let todo = parse_todo_content(content, &todo_path("ship.md"), "api", 0);

        assert_eq!(todo.blocks, vec!["web", "mobile", "web", "docs"]);
        assert_eq!(todo.blocked_by, vec!["db", "db"]);
    }

    #[test]
    fn test_inline_tags_inside_front_matter_count() {
        let content = "---\nnote: see [BLOCKS:billing]\n---\n# Refactor\n";
        let tags = parse_inline_tags(content);
        assert_eq!(tags.blocks, vec!["billing"]);
    }

    #[test]
    fn test_inline_tag_keyword_is_case_sensitive() {
        let tags = parse_inline_tags("[blocks:web] [Blocked-By:db] [BLOCKS:] [BLOCKS:api]");
        assert_eq!(tags.blocks, vec!["api"]);
        assert!(tags.blocked_by.is_empty());
    }

    #[test]
    fn test_tags_from_front_matter() {
        let content = "---\ntags: [infra, \"q3\"]\n---\n# Upgrade\n";
        let todo = parse_todo_content(content, &todo_path("upgrade.md"), "api", 0);
        assert_eq!(todo.tags, vec!["infra", "q3"]);
    }

    #[test]
    fn test_title_from_filename() {
        let title = extract_title("no headings here\n", &todo_path("fix-rate_limiting-bug.md"));
        assert_eq!(title, "Fix Rate Limiting Bug");

        let title = extract_title("", &todo_path("UPPER-case.md"));
        assert_eq!(title, "Upper Case");
    }

    #[test]
    fn test_title_skips_front_matter() {
        let content = "---\n# not a heading: really\n---\n\n### Real title ###\n";
        assert_eq!(
            extract_title(content, &todo_path("x.md")),
            "Real title ###"
        );
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("v2 api rollout"), "V2 Api Rollout");
        assert_eq!(title_case("fix2go"), "Fix2Go");
    }

    #[test]
    fn test_age_in_days() {
        let now = Utc::now();
        let three_days = SystemTime::from(now) - Duration::from_secs(3 * 86_400 + 60);
        assert_eq!(age_in_days(three_days, now), 3);

        let just_under = SystemTime::from(now) - Duration::from_secs(86_399);
        assert_eq!(age_in_days(just_under, now), 0);

        let future = SystemTime::from(now) + Duration::from_secs(86_400 * 2);
        assert_eq!(age_in_days(future, now), 0);
    }

    #[test]
    fn test_parse_file_reads_age_from_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old-task.md");
        fs::write(&path, "# Old task\n").unwrap();
        let ten_days_ago = SystemTime::now() - Duration::from_secs(10 * 86_400 + 120);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(ten_days_ago)
            .unwrap();

        let todo = parse_todo_file(&path, "api").unwrap();

        assert_eq!(todo.age_days, 10);
        assert_eq!(todo.project, "api");
        assert_eq!(todo.file_path, path);
        assert_eq!(todo.state(), TodoState::Stale);
    }

    #[test]
    fn test_unreadable_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(parse_todo_file(&dir.path().join("missing.md"), "api").is_none());

        let binary = dir.path().join("binary.md");
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert!(parse_todo_file(&binary, "api").is_none());
    }
}
