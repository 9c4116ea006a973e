//! Data models for todo aggregation.
//!
//! This module contains the parsed todo record, its computed lifecycle
//! state, and the aggregated result type shared by the cache and the
//! formatters.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Priorities that mark an item as urgent.
const URGENT_PRIORITIES: [&str; 3] = ["urgent", "p1", "high"];

/// Items older than this many days are stale.
pub const STALE_AFTER_DAYS: u64 = 7;

/// Aggregated todos keyed by org name, in configured org order.
///
/// Serializes as a JSON object whose keys keep that order, so a snapshot
/// read back from the cache renders the same way as a fresh scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoMap {
    entries: Vec<(String, Vec<TodoItem>)>,
}

impl TodoMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the items for `org`, keeping its position if already present.
    pub fn insert(&mut self, org: String, todos: Vec<TodoItem>) {
        match self.entries.iter_mut().find(|(name, _)| *name == org) {
            Some((_, existing)) => *existing = todos,
            None => self.entries.push((org, todos)),
        }
    }

    pub fn get(&self, org: &str) -> Option<&Vec<TodoItem>> {
        self.entries
            .iter()
            .find(|(name, _)| name == org)
            .map(|(_, todos)| todos)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<TodoItem>)> {
        self.entries.iter().map(|(org, todos)| (org, todos))
    }

    pub fn values(&self) -> impl Iterator<Item = &Vec<TodoItem>> {
        self.entries.iter().map(|(_, todos)| todos)
    }
}

impl FromIterator<(String, Vec<TodoItem>)> for TodoMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<TodoItem>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (org, todos) in iter {
            map.insert(org, todos);
        }
        map
    }
}

impl<'a> IntoIterator for &'a TodoMap {
    type Item = (&'a String, &'a Vec<TodoItem>);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
impl TodoMap {
    pub(crate) fn contains_key(&self, org: &str) -> bool {
        self.get(org).is_some()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(org, _)| org)
    }
}

#[cfg(test)]
impl std::ops::Index<&str> for TodoMap {
    type Output = Vec<TodoItem>;

    fn index(&self, org: &str) -> &Self::Output {
        self.get(org).expect("org present")
    }
}

impl Serialize for TodoMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for TodoMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TodoMapVisitor;

        impl<'de> Visitor<'de> for TodoMapVisitor {
            type Value = TodoMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of org names to todo lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TodoMap, A::Error> {
                let mut map = TodoMap::new();
                while let Some((org, todos)) = access.next_entry::<String, Vec<TodoItem>>()? {
                    map.insert(org, todos);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TodoMapVisitor)
    }
}

/// Key/value pairs serialized as a map in the order given.
pub(crate) struct OrderedPairs<'a, K, V>(pub &'a [(K, V)]);

impl<K: Serialize, V: Serialize> Serialize for OrderedPairs<'_, K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

/// Computed lifecycle state of a todo item.
///
/// Variants are declared in display priority order, so sorting by state
/// puts urgent items first and stale items last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    /// High priority or tagged `[URGENT]`
    Urgent,
    /// Waiting on another project
    Blocked,
    /// Pending and recently touched
    Active,
    /// Untouched for more than a week
    Stale,
}

impl TodoState {
    /// Lowercase name used in reports and the cache.
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoState::Urgent => "urgent",
            TodoState::Blocked => "blocked",
            TodoState::Active => "active",
            TodoState::Stale => "stale",
        }
    }
}

impl fmt::Display for TodoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed unit of pending work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Name of the project directory the file was found under.
    pub project: String,
    /// Path to the todo file.
    pub file_path: PathBuf,
    /// First heading, or a title derived from the file name.
    pub title: String,
    /// Free-form status (`pending` unless the front matter says otherwise).
    pub status: String,
    /// Free-form priority (`normal` unless the front matter says otherwise).
    pub priority: String,
    /// Whole days since the file was last modified, as of parse time.
    pub age_days: u64,
    /// Projects this item blocks.
    #[serde(default)]
    pub blocks: Vec<String>,
    /// Projects blocking this item.
    #[serde(default)]
    pub blocked_by: Vec<String>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TodoItem {
    pub fn is_urgent(&self) -> bool {
        URGENT_PRIORITIES.contains(&self.priority.as_str()) || self.title.contains("[URGENT]")
    }

    pub fn is_blocked(&self) -> bool {
        !self.blocked_by.is_empty() || self.title.contains("[BLOCKED")
    }

    pub fn is_stale(&self) -> bool {
        self.age_days > STALE_AFTER_DAYS
    }

    pub fn is_complete(&self) -> bool {
        self.status == "complete"
    }

    /// Classify the item. Urgent wins over blocked, blocked over stale.
    pub fn state(&self) -> TodoState {
        if self.is_urgent() {
            TodoState::Urgent
        } else if self.is_blocked() {
            TodoState::Blocked
        } else if self.is_stale() {
            TodoState::Stale
        } else {
            TodoState::Active
        }
    }

    /// First blocker, if any.
    pub fn first_blocker(&self) -> Option<&str> {
        self.blocked_by.first().map(String::as_str)
    }

    /// Flatten into the stored record shape (attributes plus `state`).
    pub fn to_record(&self) -> TodoRecord<'_> {
        TodoRecord {
            item: self,
            state: self.state(),
        }
    }
}

/// Serialized form of a [`TodoItem`] with its computed state attached.
///
/// The extra `state` key is ignored when the record is read back into a
/// `TodoItem`.
#[derive(Debug, Serialize)]
pub struct TodoRecord<'a> {
    #[serde(flatten)]
    pub item: &'a TodoItem,
    pub state: TodoState,
}

/// Total number of items across all orgs.
pub fn total_items(data: &TodoMap) -> usize {
    data.values().map(Vec::len).sum()
}
