//! todo-rollup - cross-project todo aggregation
//!
//! Collects the markdown todos kept under `.claude/work/todos` in every
//! project of a workspace, classifies them (urgent, blocked, active,
//! stale), caches the result briefly, and renders it in several formats.
//!
//! ```no_run
//! use todo_rollup::{Formatter, Paths, Scope, TodoAggregator};
//!
//! let aggregator = TodoAggregator::from_paths(&Paths::from_home());
//! let todos = aggregator.aggregate(&Scope::All, true)?;
//! print!("{}", Formatter::Banner.render(&todos)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod report;
pub mod scanner;

pub use analysis::{CacheStore, Scope, TodoAggregator};
pub use config::{OrgConfig, Paths, WorkspaceConfig};
pub use error::AggregateError;
pub use models::{TodoItem, TodoMap, TodoState};
pub use report::Formatter;
