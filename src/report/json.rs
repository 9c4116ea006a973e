//! Machine-readable JSON report.

use crate::analysis::stats::StateCounts;
use crate::models::{OrderedPairs, TodoItem, TodoMap, TodoRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct OrgReport<'a> {
    total: usize,
    by_state: StateCounts,
    todos: Vec<TodoRecord<'a>>,
}

/// Per-org totals, state counts and every item with its state.
pub fn render(data: &TodoMap) -> serde_json::Result<String> {
    let report: Vec<(&str, OrgReport<'_>)> = data
        .iter()
        .map(|(org, todos)| {
            let report = OrgReport {
                total: todos.len(),
                by_state: StateCounts::from_todos(todos),
                todos: todos.iter().map(TodoItem::to_record).collect(),
            };
            (org.as_str(), report)
        })
        .collect();

    serde_json::to_string_pretty(&OrderedPairs(&report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::item;
    use serde_json::{json, Value};

    #[test]
    fn test_structure() {
        let mut data = TodoMap::new();
        data.insert(
            "acme".to_string(),
            vec![
                TodoItem {
                    priority: "urgent".to_string(),
                    tags: vec!["ops".to_string()],
                    ..item("api", "Rotate keys")
                },
                TodoItem {
                    age_days: 9,
                    ..item("web", "Old styles")
                },
                item("web", "New page"),
            ],
        );
        data.insert("empty".to_string(), Vec::new());

        let value: Value = serde_json::from_str(&render(&data).unwrap()).unwrap();

        assert_eq!(value["acme"]["total"], 3);
        assert_eq!(
            value["acme"]["by_state"],
            json!({"urgent": 1, "blocked": 0, "active": 1, "stale": 1})
        );
        let first = &value["acme"]["todos"][0];
        assert_eq!(first["title"], "Rotate keys");
        assert_eq!(first["state"], "urgent");
        assert_eq!(first["priority"], "urgent");
        assert_eq!(first["status"], "pending");
        assert_eq!(first["tags"], json!(["ops"]));
        assert_eq!(first["blocks"], json!([]));
        assert_eq!(first["blocked_by"], json!([]));
        assert_eq!(value["acme"]["todos"][1]["age_days"], 9);
        assert_eq!(value["empty"]["total"], 0);
        assert_eq!(value["empty"]["todos"], json!([]));
    }

    #[test]
    fn test_empty_map() {
        assert_eq!(render(&TodoMap::new()).unwrap(), "{}");
    }

    #[test]
    fn test_orgs_in_map_order() {
        let mut data = TodoMap::new();
        data.insert("zeta".to_string(), vec![item("api", "Z")]);
        data.insert("alpha".to_string(), vec![item("web", "A")]);

        let output = render(&data).unwrap();

        assert!(output.find("\"zeta\"").unwrap() < output.find("\"alpha\"").unwrap());
    }
}
