//! Workspace configuration handling.
//!
//! This module resolves the workspace root and its orgs from
//! `~/.claude/workspace-config.json`, falling back to scanning the
//! workspace directory when the file is missing or unusable.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Workspace directory name under the home directory.
const DEFAULT_WORKSPACE_DIR: &str = "Code";

/// Auto-discovered org that is marked default when present.
const DEFAULT_ORG_HINT: &str = "gruntwork";

/// File locations used by the aggregator.
///
/// Passed explicitly so tests can point everything at a temporary
/// directory.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Workspace config file.
    pub config_file: PathBuf,
    /// Snapshot cache file.
    pub cache_file: PathBuf,
    /// Workspace root used when no config file is available.
    pub fallback_workspace: PathBuf,
    /// Home directory used for `~` expansion.
    pub home: Option<PathBuf>,
}

impl Paths {
    /// Standard locations under the current user's home directory.
    pub fn from_home() -> Self {
        match dirs::home_dir() {
            Some(home) => Self::under(&home),
            None => {
                warn!("Could not determine home directory, using current directory");
                let mut paths = Self::under(Path::new("."));
                paths.home = None;
                paths
            }
        }
    }

    /// Standard locations under an explicit home directory.
    pub fn under(home: &Path) -> Self {
        let claude_dir = home.join(".claude");
        Self {
            config_file: claude_dir.join("workspace-config.json"),
            cache_file: claude_dir.join("cache").join("todo-aggregator.json"),
            fallback_workspace: home.join(DEFAULT_WORKSPACE_DIR),
            home: Some(home.to_path_buf()),
        }
    }
}

/// A named subdivision of the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgConfig {
    pub name: String,
    /// Absolute directory of the org (`<workspace>/<name>`).
    pub path: PathBuf,
    /// Advisory: at most one org should be the default.
    pub default: bool,
    /// Advisory marker only, not enforced.
    pub sensitive: bool,
}

impl OrgConfig {
    fn from_entry(entry: OrgEntry, workspace: &Path) -> Self {
        Self {
            path: workspace.join(&entry.name),
            name: entry.name,
            default: entry.default,
            sensitive: entry.sensitive,
        }
    }
}

/// Where the org list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    AutoDiscovered,
}

/// Resolved workspace configuration.
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// Workspace root directory.
    pub workspace: PathBuf,
    /// Orgs in configured (or discovered) order.
    pub orgs: Vec<OrgConfig>,
    /// Directory names never treated as projects.
    pub exclude_patterns: Vec<String>,
    pub source: ConfigSource,
    /// Why the config file was ignored, if it was.
    pub warning: Option<String>,
}

/// On-disk shape of the config file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_workspace_setting")]
    workspace: String,

    #[serde(default)]
    orgs: Vec<OrgEntry>,

    #[serde(default)]
    exclude_patterns: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct OrgEntry {
    name: String,

    #[serde(default)]
    default: bool,

    #[serde(default)]
    sensitive: bool,
}

fn default_workspace_setting() -> String {
    format!("~/{}", DEFAULT_WORKSPACE_DIR)
}

/// Directory names excluded from project discovery by default.
pub fn default_excludes() -> Vec<String> {
    vec![".git", "node_modules", "venv", ".venv", "__pycache__"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Expand a leading `~` against `home`.
pub fn expand_tilde(raw: &str, home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) if raw == "~" => home.to_path_buf(),
        Some(home) => match raw.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => PathBuf::from(raw),
        },
        None => PathBuf::from(raw),
    }
}

impl WorkspaceConfig {
    /// Resolve the workspace configuration. Never fails.
    ///
    /// A missing config file means auto-discovery; an unreadable or
    /// malformed one also means auto-discovery, with the reason kept in
    /// [`WorkspaceConfig::warning`].
    pub fn load(paths: &Paths) -> Self {
        if !paths.config_file.exists() {
            debug!(
                "No config at {}, discovering orgs in {}",
                paths.config_file.display(),
                paths.fallback_workspace.display()
            );
            return Self::discover(&paths.fallback_workspace);
        }

        match Self::from_file(&paths.config_file, paths.home.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load workspace config: {}", e);
                let mut config = Self::discover(&paths.fallback_workspace);
                config.warning = Some(e.to_string());
                config
            }
        }
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path, home: Option<&Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&content, home)
            .map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })
            .map(|mut config| {
                config.source = ConfigSource::File(path.to_path_buf());
                config
            })
    }

    fn from_json(content: &str, home: Option<&Path>) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_str(content)?;
        let workspace = expand_tilde(&file.workspace, home);

        let orgs = file
            .orgs
            .into_iter()
            .map(|entry| OrgConfig::from_entry(entry, &workspace))
            .collect();

        Ok(Self {
            workspace,
            orgs,
            exclude_patterns: file.exclude_patterns.unwrap_or_else(default_excludes),
            source: ConfigSource::AutoDiscovered,
            warning: None,
        })
    }

    /// Treat every non-hidden subdirectory of `workspace` as an org.
    pub fn discover(workspace: &Path) -> Self {
        let mut orgs = Vec::new();

        if workspace.is_dir() {
            let entries = WalkDir::new(workspace)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        debug!("Skipping workspace entry: {}", e);
                        None
                    }
                });

            for entry in entries {
                let name = entry.file_name().to_string_lossy().to_string();
                if name.starts_with('.') || !entry.path().is_dir() {
                    continue;
                }

                orgs.push(OrgConfig {
                    default: name.to_lowercase() == DEFAULT_ORG_HINT,
                    path: entry.path().to_path_buf(),
                    name,
                    sensitive: false,
                });
            }
        }

        Self {
            workspace: workspace.to_path_buf(),
            orgs,
            exclude_patterns: default_excludes(),
            source: ConfigSource::AutoDiscovered,
            warning: None,
        }
    }

    /// First org flagged default, else the first org.
    pub fn default_org(&self) -> Option<&OrgConfig> {
        self.orgs
            .iter()
            .find(|org| org.default)
            .or_else(|| self.orgs.first())
    }

    /// Look up an org by name, ignoring case.
    pub fn org_by_name(&self, name: &str) -> Option<&OrgConfig> {
        let wanted = name.to_lowercase();
        self.orgs.iter().find(|org| org.name.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths_in(home: &TempDir) -> Paths {
        Paths::under(home.path())
    }

    fn write_config(paths: &Paths, content: &str) {
        fs::create_dir_all(paths.config_file.parent().unwrap()).unwrap();
        fs::write(&paths.config_file, content).unwrap();
    }

    #[test]
    fn test_paths_under_home() {
        let paths = Paths::under(Path::new("/home/dev"));
        assert_eq!(
            paths.config_file,
            PathBuf::from("/home/dev/.claude/workspace-config.json")
        );
        assert_eq!(
            paths.cache_file,
            PathBuf::from("/home/dev/.claude/cache/todo-aggregator.json")
        );
        assert_eq!(paths.fallback_workspace, PathBuf::from("/home/dev/Code"));
    }

    #[test]
    fn test_expand_tilde() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_tilde("~", Some(home)), PathBuf::from("/home/dev"));
        assert_eq!(
            expand_tilde("~/Code", Some(home)),
            PathBuf::from("/home/dev/Code")
        );
        assert_eq!(expand_tilde("/srv/code", Some(home)), PathBuf::from("/srv/code"));
        assert_eq!(expand_tilde("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde("~/Code", None), PathBuf::from("~/Code"));
    }

    #[test]
    fn test_load_config_file() {
        let home = TempDir::new().unwrap();
        let paths = paths_in(&home);
        write_config(
            &paths,
            r#"{
                "workspace": "~/src",
                "orgs": [
                    {"name": "personal"},
                    {"name": "acme", "default": true, "sensitive": true}
                ]
            }"#,
        );

        let config = WorkspaceConfig::load(&paths);
        let workspace = home.path().join("src");

        assert_eq!(config.workspace, workspace);
        assert_eq!(config.source, ConfigSource::File(paths.config_file.clone()));
        assert!(config.warning.is_none());
        assert_eq!(config.orgs.len(), 2);
        assert_eq!(config.orgs[0].name, "personal");
        assert_eq!(config.orgs[0].path, workspace.join("personal"));
        assert!(!config.orgs[0].default);
        assert!(!config.orgs[0].sensitive);
        assert!(config.orgs[1].default);
        assert!(config.orgs[1].sensitive);
        assert_eq!(config.exclude_patterns, default_excludes());
    }

    #[test]
    fn test_exclude_patterns_override() {
        let home = TempDir::new().unwrap();
        let paths = paths_in(&home);
        write_config(
            &paths,
            r#"{"workspace": "/srv/code", "orgs": [], "exclude_patterns": ["archive"]}"#,
        );

        let config = WorkspaceConfig::load(&paths);
        assert_eq!(config.workspace, PathBuf::from("/srv/code"));
        assert_eq!(config.exclude_patterns, vec!["archive".to_string()]);
    }

    #[test]
    fn test_missing_workspace_defaults_to_code() {
        let home = TempDir::new().unwrap();
        let paths = paths_in(&home);
        write_config(&paths, r#"{"orgs": [{"name": "solo"}]}"#);

        let config = WorkspaceConfig::load(&paths);
        assert_eq!(config.workspace, home.path().join("Code"));
        assert_eq!(config.orgs[0].path, home.path().join("Code").join("solo"));
    }

    #[test]
    fn test_auto_discovery_without_config() {
        let home = TempDir::new().unwrap();
        let paths = paths_in(&home);
        let workspace = &paths.fallback_workspace;
        for dir in ["zeta", "Gruntwork", ".hidden", "alpha"] {
            fs::create_dir_all(workspace.join(dir)).unwrap();
        }
        fs::write(workspace.join("notes.txt"), "not an org").unwrap();

        let config = WorkspaceConfig::load(&paths);
        let names: Vec<_> = config.orgs.iter().map(|o| o.name.as_str()).collect();

        assert_eq!(config.source, ConfigSource::AutoDiscovered);
        assert_eq!(names, vec!["Gruntwork", "alpha", "zeta"]);
        assert!(config.orgs[0].default);
        assert!(!config.orgs[1].default);
        assert_eq!(config.default_org().unwrap().name, "Gruntwork");
    }

    #[test]
    fn test_malformed_config_falls_back_with_warning() {
        let home = TempDir::new().unwrap();
        let paths = paths_in(&home);
        fs::create_dir_all(paths.fallback_workspace.join("personal")).unwrap();
        write_config(&paths, "{ not json");

        let config = WorkspaceConfig::load(&paths);

        assert_eq!(config.source, ConfigSource::AutoDiscovered);
        assert_eq!(config.orgs.len(), 1);
        assert_eq!(config.orgs[0].name, "personal");
        let warning = config.warning.expect("warning recorded");
        assert!(warning.contains("failed to parse"));
    }

    #[test]
    fn test_org_entry_requires_name() {
        let home = TempDir::new().unwrap();
        let paths = paths_in(&home);
        write_config(&paths, r#"{"orgs": [{"default": true}]}"#);

        let config = WorkspaceConfig::load(&paths);
        assert!(config.warning.is_some());
        assert!(config.orgs.is_empty());
    }

    #[test]
    fn test_missing_workspace_dir_yields_no_orgs() {
        let config = WorkspaceConfig::discover(Path::new("/definitely/not/here"));
        assert!(config.orgs.is_empty());
        assert!(config.default_org().is_none());
    }

    #[test]
    fn test_default_org_falls_back_to_first() {
        let config = WorkspaceConfig::from_json(
            r#"{"workspace": "/w", "orgs": [{"name": "one"}, {"name": "two"}]}"#,
            None,
        )
        .unwrap();
        assert_eq!(config.default_org().unwrap().name, "one");
    }

    #[test]
    fn test_org_by_name_ignores_case() {
        let config = WorkspaceConfig::from_json(
            r#"{"workspace": "/w", "orgs": [{"name": "ClientWork"}]}"#,
            None,
        )
        .unwrap();
        assert!(config.org_by_name("clientwork").is_some());
        assert!(config.org_by_name("CLIENTWORK").is_some());
        assert!(config.org_by_name("personal").is_none());
    }
}
