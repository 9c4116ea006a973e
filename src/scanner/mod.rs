//! Project scanner for discovering todo directories.
//!
//! This module finds the projects inside an org that keep todos under
//! `.claude/work/todos`, and lists the todo files within them.

use crate::config::{default_excludes, OrgConfig, WorkspaceConfig};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Todo directory, relative to a project root.
pub const TODO_SUBPATH: &str = ".claude/work/todos";

/// Extension of todo files.
const TODO_EXTENSION: &str = "md";

/// Configuration for project scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory names never treated as projects (e.g. ["node_modules", ".git"])
    pub excludes: Vec<String>,
    /// Todo directory relative to each project
    pub todo_subpath: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excludes: default_excludes(),
            todo_subpath: PathBuf::from(TODO_SUBPATH),
        }
    }
}

impl From<&WorkspaceConfig> for ScanConfig {
    fn from(config: &WorkspaceConfig) -> Self {
        Self {
            excludes: config.exclude_patterns.clone(),
            ..Self::default()
        }
    }
}

/// Scanner for projects and their todo files.
#[derive(Debug, Clone)]
pub struct ProjectScanner {
    config: ScanConfig,
}

impl ProjectScanner {
    /// Create a new project scanner.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Projects in `org` that have a todo directory, sorted by name.
    ///
    /// A missing org directory yields no projects.
    pub fn discover_projects(&self, org: &OrgConfig) -> Vec<PathBuf> {
        if !org.path.is_dir() {
            debug!("Org directory missing: {}", org.path.display());
            return Vec::new();
        }

        list_children(&org.path)
            .filter(|entry| entry.path().is_dir())
            .filter(|entry| !self.is_excluded(&entry_name(entry)))
            .map(|entry| entry.into_path())
            .filter(|project| self.todos_dir(project).is_dir())
            .collect()
    }

    /// Todo directory of a project.
    pub fn todos_dir(&self, project: &Path) -> PathBuf {
        project.join(&self.config.todo_subpath)
    }

    /// Markdown files directly inside the project's todo directory, sorted
    /// by name. Dotfiles such as `.draft.md` count.
    pub fn todo_files(&self, project: &Path) -> Vec<PathBuf> {
        let dir = self.todos_dir(project);

        list_children(&dir)
            .filter(|entry| {
                entry.path().extension().and_then(|e| e.to_str()) == Some(TODO_EXTENSION)
            })
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }

    /// Check if a directory name is hidden or excluded.
    fn is_excluded(&self, name: &str) -> bool {
        if name.starts_with('.') {
            return true;
        }

        self.config.excludes.iter().any(|pattern| name == pattern)
    }
}

/// Immediate children of `dir`, sorted by file name.
fn list_children(dir: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Cannot read directory entry: {}", e);
                None
            }
        })
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}
