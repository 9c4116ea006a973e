//! Snapshot cache for aggregated todos.
//!
//! The cache is a single JSON file mapping org name to flattened todo
//! records. Freshness is judged by the file's modification time; reads and
//! writes are best-effort and never fail the caller.

use crate::models::{OrderedPairs, TodoItem, TodoMap, TodoRecord};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// How long a snapshot stays fresh.
pub const CACHE_TTL_SECONDS: u64 = 300;

/// File-backed snapshot of the last fresh scan.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ttl: Duration::from_secs(CACHE_TTL_SECONDS),
        }
    }

    /// Load the snapshot if it exists, is fresh, and parses.
    pub fn load(&self) -> Option<TodoMap> {
        let modified = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => {
                debug!("No cache at {}", self.path.display());
                return None;
            }
        };

        if !self.is_fresh(modified, SystemTime::now()) {
            debug!("Cache at {} has expired", self.path.display());
            return None;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Cannot read cache {}: {}", self.path.display(), e);
                return None;
            }
        };

        match decode(&content) {
            Ok(data) => {
                debug!("Using cached todos from {}", self.path.display());
                Some(data)
            }
            Err(e) => {
                debug!("Ignoring corrupt cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Persist a snapshot. Failures are logged and swallowed.
    pub fn save(&self, data: &TodoMap) {
        if let Err(e) = self.try_save(data) {
            warn!("Failed to write cache {}: {}", self.path.display(), e);
        }
    }

    /// Write to a temp file beside the cache, then rename it into place.
    fn try_save(&self, data: &TodoMap) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(encode(data)?.as_bytes())?;
        file.persist(&self.path)?;

        debug!("Cached todos at {}", self.path.display());
        Ok(())
    }

    /// A snapshot written at `modified` is fresh at `now` when it is at
    /// most one TTL old.
    fn is_fresh(&self, modified: SystemTime, now: SystemTime) -> bool {
        match now.duration_since(modified) {
            Ok(age) => age <= self.ttl,
            // Written "in the future": clock skew, treat as fresh
            Err(_) => true,
        }
    }
}

/// Serialize aggregated todos into the cache format.
pub fn encode(data: &TodoMap) -> serde_json::Result<String> {
    let records: Vec<(&str, Vec<TodoRecord<'_>>)> = data
        .iter()
        .map(|(org, todos)| (org.as_str(), todos.iter().map(TodoItem::to_record).collect()))
        .collect();

    serde_json::to_string(&OrderedPairs(&records))
}

/// Read aggregated todos back from the cache format.
pub fn decode(content: &str) -> serde_json::Result<TodoMap> {
    serde_json::from_str(content)
}
