//! Grouping and counting helpers over aggregated todos.
//!
//! Shared by the formatters so every output shape classifies and groups
//! items the same way.

use crate::models::{TodoItem, TodoState};
use serde::Serialize;
use std::collections::BTreeMap;

/// Item counts per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub urgent: usize,
    pub blocked: usize,
    pub active: usize,
    pub stale: usize,
}

impl StateCounts {
    pub fn from_todos<'a>(todos: impl IntoIterator<Item = &'a TodoItem>) -> Self {
        let mut counts = Self::default();
        for todo in todos {
            match todo.state() {
                TodoState::Urgent => counts.urgent += 1,
                TodoState::Blocked => counts.blocked += 1,
                TodoState::Active => counts.active += 1,
                TodoState::Stale => counts.stale += 1,
            }
        }
        counts
    }
}

/// Items split by state, each bucket keeping input order.
#[derive(Debug, Default)]
pub struct StateGroups<'a> {
    pub urgent: Vec<&'a TodoItem>,
    pub blocked: Vec<&'a TodoItem>,
    pub active: Vec<&'a TodoItem>,
    pub stale: Vec<&'a TodoItem>,
}

/// Split items by computed state.
pub fn group_by_state<'a>(todos: impl IntoIterator<Item = &'a TodoItem>) -> StateGroups<'a> {
    let mut groups = StateGroups::default();
    for todo in todos {
        match todo.state() {
            TodoState::Urgent => groups.urgent.push(todo),
            TodoState::Blocked => groups.blocked.push(todo),
            TodoState::Active => groups.active.push(todo),
            TodoState::Stale => groups.stale.push(todo),
        }
    }
    groups
}

/// Group items by project, projects in order of first appearance.
pub fn group_by_project(todos: &[TodoItem]) -> Vec<(&str, Vec<&TodoItem>)> {
    let mut groups: Vec<(&str, Vec<&TodoItem>)> = Vec::new();

    for todo in todos {
        match groups.iter_mut().find(|(name, _)| *name == todo.project) {
            Some((_, items)) => items.push(todo),
            None => groups.push((todo.project.as_str(), vec![todo])),
        }
    }

    groups
}

/// Number of items per project, sorted by project name.
pub fn count_by_project<'a>(todos: &[&'a TodoItem]) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for &todo in todos {
        *counts.entry(todo.project.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Order projects for display: any urgent first, then any blocked, then
/// by descending item count. Ties keep their incoming order.
pub fn sort_projects(projects: &mut [(&str, Vec<&TodoItem>)]) {
    projects.sort_by_key(|(_, items)| {
        let has_urgent = items.iter().any(|t| t.state() == TodoState::Urgent);
        let has_blocked = items.iter().any(|t| t.state() == TodoState::Blocked);
        (!has_urgent, !has_blocked, std::cmp::Reverse(items.len()))
    });
}

/// Sort items by state priority (urgent, blocked, active, stale), stable.
pub fn sort_by_state(todos: &mut [&TodoItem]) {
    todos.sort_by_key(|t| t.state());
}
