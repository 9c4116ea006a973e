//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;
use todo_rollup::{Paths, Scope};

/// todo-rollup - cross-project todo summary
///
/// Collects todos from `.claude/work/todos` in every project of your
/// workspace orgs and shows what is urgent, blocked, active or stale.
///
/// Examples:
///   todo-rollup                      # Default org, terminal format
///   todo-rollup --all                # All orgs in the workspace
///   todo-rollup --org personal       # One org
///   todo-rollup --format json        # Machine-readable output
///   todo-rollup --by-project -v      # Every item, grouped by project
///   todo-rollup --list-orgs
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Org to scan (e.g. personal, client-work)
    #[arg(short, long, value_name = "NAME", conflicts_with = "all")]
    pub org: Option<String>,

    /// Scan every configured org in the workspace
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, default_value = "terminal", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Group output by project (shortcut for --format project)
    #[arg(long)]
    pub by_project: bool,

    /// Force a fresh scan, ignoring the cache
    #[arg(long)]
    pub no_cache: bool,

    /// Show every item (terminal and project formats)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors and never show a progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// List configured orgs and exit
    #[arg(long)]
    pub list_orgs: bool,

    /// Path to the workspace config file
    ///
    /// Defaults to ~/.claude/workspace-config.json
    #[arg(long, value_name = "FILE", env = "TODO_ROLLUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the snapshot cache file
    ///
    /// Defaults to ~/.claude/cache/todo-aggregator.json
    #[arg(long, value_name = "FILE", env = "TODO_ROLLUP_CACHE")]
    pub cache_file: Option<PathBuf>,

    /// Workspace to auto-discover orgs in when no config file is usable
    ///
    /// Defaults to ~/Code
    #[arg(long, value_name = "DIR", env = "TODO_ROLLUP_WORKSPACE")]
    pub workspace: Option<PathBuf>,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Sections by state (default)
    #[default]
    Terminal,
    /// Full JSON dump
    Json,
    /// Urgent/blocked counts per org
    Compact,
    /// Cross-org session banner
    #[value(alias = "overwatch")]
    Banner,
    /// Sections by project
    Project,
}

impl OutputFormat {
    /// Formatter name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Terminal => "terminal",
            OutputFormat::Json => "json",
            OutputFormat::Compact => "compact",
            OutputFormat::Banner => "banner",
            OutputFormat::Project => "project",
        }
    }

    /// Whether the format is meant to be read by a person at a terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self, OutputFormat::Terminal | OutputFormat::Project)
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref org) = self.org {
            if org.trim().is_empty() {
                return Err("Org name must not be empty".to_string());
            }
        }

        if self.debug && self.quiet {
            return Err("Cannot use both --debug and --quiet".to_string());
        }

        if self.by_project && self.format != OutputFormat::Terminal {
            return Err(format!(
                "--by-project cannot be combined with --format {}",
                self.format.name()
            ));
        }

        Ok(())
    }

    /// Effective output format (`--by-project` wins).
    pub fn output_format(&self) -> OutputFormat {
        if self.by_project {
            OutputFormat::Project
        } else {
            self.format
        }
    }

    /// Orgs selected by `--org` / `--all`.
    pub fn scope(&self) -> Scope {
        match (&self.org, self.all) {
            (Some(name), _) => Scope::Org(name.clone()),
            (None, true) => Scope::All,
            (None, false) => Scope::Default,
        }
    }

    /// Standard paths with command-line overrides applied.
    pub fn paths(&self) -> Paths {
        let mut paths = Paths::from_home();
        if let Some(ref config) = self.config {
            paths.config_file = config.clone();
        }
        if let Some(ref cache) = self.cache_file {
            paths.cache_file = cache.clone();
        }
        if let Some(ref workspace) = self.workspace {
            paths.fallback_workspace = workspace.clone();
        }
        paths
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
