//! Error types for the todo aggregator.

use thiserror::Error;

/// Errors surfaced to callers of the aggregator.
///
/// Everything else (unreadable todo files, a broken config file, a corrupt
/// or stale cache) is absorbed inside the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The requested org is not part of the workspace configuration.
    #[error("unknown org: {0}")]
    UnknownOrg(String),
}

/// Reasons a workspace config file could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An output format name that no formatter answers to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown format: {name}. Choose from: {choices}")]
pub struct UnknownFormat {
    pub name: String,
    pub choices: String,
}
