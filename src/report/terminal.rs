//! Human-readable terminal reports.
//!
//! Two layouts share the same header and hint conventions: one groups
//! each org's items by state, the other by project.

use super::{age_suffix, RULE_WIDTH, VERBOSE_HINT};
use crate::analysis::stats::{
    count_by_project, group_by_project, group_by_state, sort_by_state, sort_projects, StateCounts,
};
use crate::models::{TodoItem, TodoMap, TodoState};

/// Stale items listed in non-verbose mode.
const STALE_PREVIEW: usize = 2;

/// Items listed per project in non-verbose mode.
const PROJECT_PREVIEW: usize = 3;

/// Non-verbose output hints at `--verbose` past these sizes.
const ACTIVE_HINT_THRESHOLD: usize = 5;

fn push_header(lines: &mut Vec<String>, title: &str, org: &str) {
    lines.push(format!("{} ({})", title, org));
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(String::new());
}

fn item_line(todo: &TodoItem) -> String {
    format!("  [{}] {}{}", todo.project, todo.title, age_suffix(todo))
}

fn blocked_line(todo: &TodoItem) -> String {
    format!(
        "  [{}] {} (waiting: {})",
        todo.project,
        todo.title,
        todo.first_blocker().unwrap_or("unknown")
    )
}

fn stale_line(todo: &TodoItem) -> String {
    format!("  [{}] {} ({}d)", todo.project, todo.title, todo.age_days)
}

/// Per-org sections: urgent, blocked, active, stale.
///
/// Without `verbose`, active items collapse to per-project counts and
/// only the first two stale items are listed.
pub fn render_by_state(data: &TodoMap, verbose: bool) -> String {
    let mut lines = Vec::new();

    for (org, todos) in data {
        if todos.is_empty() {
            continue;
        }

        push_header(&mut lines, "CROSS-PROJECT TODO SUMMARY", org);
        let groups = group_by_state(todos);

        if !groups.urgent.is_empty() {
            lines.push(format!("URGENT ({})", groups.urgent.len()));
            lines.extend(groups.urgent.iter().map(|t| item_line(t)));
            lines.push(String::new());
        }

        if !groups.blocked.is_empty() {
            lines.push(format!("BLOCKED ({})", groups.blocked.len()));
            lines.extend(groups.blocked.iter().map(|t| blocked_line(t)));
            lines.push(String::new());
        }

        if !groups.active.is_empty() {
            lines.push(format!("ACTIVE ({})", groups.active.len()));
            if verbose {
                lines.extend(groups.active.iter().map(|t| item_line(t)));
            } else {
                for (project, count) in count_by_project(&groups.active) {
                    lines.push(format!("  [{}] {} pending", project, count));
                }
            }
            lines.push(String::new());
        }

        if !groups.stale.is_empty() {
            if verbose {
                lines.push(format!("STALE ({})", groups.stale.len()));
                lines.extend(groups.stale.iter().map(|t| stale_line(t)));
            } else {
                let shown = &groups.stale[..groups.stale.len().min(STALE_PREVIEW)];
                lines.push(format!(
                    "STALE ({} items, {} shown)",
                    groups.stale.len(),
                    shown.len()
                ));
                lines.extend(shown.iter().map(|t| stale_line(t)));
            }
            lines.push(String::new());
        }

        if !verbose
            && (groups.active.len() > ACTIVE_HINT_THRESHOLD || groups.stale.len() > STALE_PREVIEW)
        {
            lines.push(VERBOSE_HINT.to_string());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn project_item_line(todo: &TodoItem) -> String {
    match (todo.state(), todo.first_blocker()) {
        (TodoState::Blocked, Some(blocker)) => {
            format!("  - [{}] {} (waiting: {})", todo.state(), todo.title, blocker)
        }
        _ => format!("  - [{}] {}{}", todo.state(), todo.title, age_suffix(todo)),
    }
}

fn joined_counts(counts: &[(usize, &str)]) -> String {
    counts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{} {}", n, label))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-org sections listing what each project needs.
///
/// Projects with urgent items come first, then those with blocked items,
/// then the busiest. Without `verbose`, three items per project are shown.
pub fn render_by_project(data: &TodoMap, verbose: bool) -> String {
    let mut lines = Vec::new();

    for (org, todos) in data {
        if todos.is_empty() {
            continue;
        }

        push_header(&mut lines, "PROJECT STATUS", org);

        let mut projects = group_by_project(todos);
        sort_projects(&mut projects);

        for (project, items) in &projects {
            let counts = StateCounts::from_todos(items.iter().copied());
            let status = joined_counts(&[
                (counts.urgent, "urgent"),
                (counts.blocked, "blocked"),
                (counts.stale, "stale"),
            ]);
            let status = if status.is_empty() {
                status
            } else {
                format!(" - {}", status)
            };
            lines.push(format!("{} ({} todos){}", project, items.len(), status));

            let mut sorted = items.clone();
            sort_by_state(&mut sorted);

            let limit = if verbose { sorted.len() } else { PROJECT_PREVIEW };
            lines.extend(sorted.iter().take(limit).map(|t| project_item_line(t)));
            if sorted.len() > limit {
                lines.push(format!("  ... and {} more", sorted.len() - limit));
            }

            lines.push(String::new());
        }

        let totals = StateCounts::from_todos(todos);
        let flagged = joined_counts(&[(totals.urgent, "urgent"), (totals.blocked, "blocked")]);
        let mut summary = format!(
            "Summary: {} todos across {} projects",
            todos.len(),
            projects.len()
        );
        if !flagged.is_empty() {
            summary.push_str(&format!(" ({})", flagged));
        }
        lines.push(summary);

        if !verbose {
            lines.push(VERBOSE_HINT.to_string());
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
