//! Short summaries for status lines and session banners.
//!
//! Both formats stay silent unless something is urgent or blocked.

use crate::analysis::stats::group_by_state;
use crate::models::{TodoItem, TodoMap, TodoState};

/// Urgent items listed in the session banner.
const BANNER_PREVIEW: usize = 2;

/// One block per org with urgent or blocked work.
///
/// ```text
/// [acme] 2 urgent, 1 blocked (9 total)
///    ! [api] Fix rate limiting
/// ```
pub fn render_compact(data: &TodoMap) -> String {
    let mut lines = Vec::new();

    for (org, todos) in data {
        let groups = group_by_state(todos);
        if groups.urgent.is_empty() && groups.blocked.is_empty() {
            continue;
        }

        let mut parts = Vec::new();
        if !groups.urgent.is_empty() {
            parts.push(format!("{} urgent", groups.urgent.len()));
        }
        if !groups.blocked.is_empty() {
            parts.push(format!("{} blocked", groups.blocked.len()));
        }

        let open = todos.iter().filter(|t| !t.is_complete()).count();
        lines.push(format!("[{}] {} ({} total)", org, parts.join(", "), open));

        if let Some(first) = groups.urgent.first() {
            lines.push(format!("   ! [{}] {}", first.project, first.title));
        }
    }

    lines.join("\n")
}

/// Cross-org roll-up for the start of a session.
pub fn render_banner(data: &TodoMap) -> String {
    let all: Vec<&TodoItem> = data.values().flatten().collect();
    let urgent: Vec<&TodoItem> = all
        .iter()
        .copied()
        .filter(|t| t.state() == TodoState::Urgent)
        .collect();
    let blocked = all
        .iter()
        .filter(|t| t.state() == TodoState::Blocked)
        .count();

    if urgent.is_empty() && blocked == 0 {
        return String::new();
    }

    let mut lines = Vec::new();

    if !urgent.is_empty() {
        lines.push(format!("{} urgent todo(s) across projects", urgent.len()));
        for todo in urgent.iter().take(BANNER_PREVIEW) {
            lines.push(format!("   [{}] {}", todo.project, todo.title));
        }
    }

    if blocked > 0 {
        lines.push(format!("{} blocked todo(s) need attention", blocked));
    }

    lines.push(format!("   Run {} for details", env!("CARGO_PKG_NAME")));

    lines.join("\n")
}
