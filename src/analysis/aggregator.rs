//! Todo aggregation across workspace orgs.
//!
//! This module ties discovery, parsing and the snapshot cache together:
//! pick the orgs in scope, find their projects, parse every todo file,
//! drop completed items, and remember the result for a few minutes.

use crate::analysis::cache::CacheStore;
use crate::config::{OrgConfig, Paths, WorkspaceConfig};
use crate::error::AggregateError;
use crate::models::{total_items, TodoItem, TodoMap};
use crate::parser::parse_todo_file;
use crate::scanner::{ProjectScanner, ScanConfig};
use tracing::{debug, info};

/// Which orgs an aggregation covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// The org flagged default, else the first configured org.
    #[default]
    Default,
    /// Every configured org.
    All,
    /// One org by name (case-insensitive).
    Org(String),
}

/// Aggregates todos from projects in workspace orgs.
pub struct TodoAggregator {
    config: WorkspaceConfig,
    scanner: ProjectScanner,
    cache: CacheStore,
}

impl TodoAggregator {
    /// Create an aggregator over a resolved configuration.
    pub fn new(config: WorkspaceConfig, cache: CacheStore) -> Self {
        let scanner = ProjectScanner::new(ScanConfig::from(&config));
        Self {
            config,
            scanner,
            cache,
        }
    }

    /// Resolve configuration and cache location from `paths`.
    pub fn from_paths(paths: &Paths) -> Self {
        Self::new(
            WorkspaceConfig::load(paths),
            CacheStore::new(paths.cache_file.clone()),
        )
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Orgs covered by `scope`.
    ///
    /// An unknown org name is an error; a default scope over a workspace
    /// with no orgs is simply empty.
    pub fn resolve_scope(&self, scope: &Scope) -> Result<Vec<&OrgConfig>, AggregateError> {
        match scope {
            Scope::All => Ok(self.config.orgs.iter().collect()),
            Scope::Default => Ok(self.config.default_org().into_iter().collect()),
            Scope::Org(name) => self
                .config
                .org_by_name(name)
                .map(|org| vec![org])
                .ok_or_else(|| AggregateError::UnknownOrg(name.clone())),
        }
    }

    /// Aggregate todos for `scope`.
    ///
    /// With `use_cache`, a fresh snapshot is returned as stored, whatever
    /// scope produced it. Otherwise (or on a miss) the orgs are scanned and
    /// the result is written back to the cache.
    pub fn aggregate(&self, scope: &Scope, use_cache: bool) -> Result<TodoMap, AggregateError> {
        let orgs = self.resolve_scope(scope)?;

        if use_cache {
            if let Some(cached) = self.cache.load() {
                return Ok(cached);
            }
        }

        let result = self.scan(&orgs);
        self.cache.save(&result);

        Ok(result)
    }

    /// Scan `orgs` without touching the cache.
    pub fn scan(&self, orgs: &[&OrgConfig]) -> TodoMap {
        let result: TodoMap = orgs
            .iter()
            .map(|org| (org.name.clone(), self.scan_org(org)))
            .collect();

        info!(
            "Scanned {} org(s), {} open todo(s)",
            result.len(),
            total_items(&result)
        );

        result
    }

    /// Parse every open todo in one org.
    pub fn scan_org(&self, org: &OrgConfig) -> Vec<TodoItem> {
        let mut todos = Vec::new();
        let projects = self.scanner.discover_projects(org);
        debug!("Org {}: {} project(s) with todos", org.name, projects.len());

        for project_path in projects {
            let project_name = project_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            for todo_file in self.scanner.todo_files(&project_path) {
                match parse_todo_file(&todo_file, &project_name) {
                    Some(todo) if todo.is_complete() => {
                        debug!("Skipping completed todo {}", todo_file.display());
                    }
                    Some(todo) => todos.push(todo),
                    None => {}
                }
            }
        }

        todos
    }
}
