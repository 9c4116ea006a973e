//! Output formatting for aggregated todos.
//!
//! Every format renders a [`TodoMap`] to a string; an empty string means
//! there is nothing worth printing. Formats are selected by name through
//! [`Formatter::from_name`].

mod json;
mod summary;
mod terminal;

use crate::error::UnknownFormat;
use crate::models::{TodoItem, TodoMap};
use anyhow::Result;

/// Hint appended to non-verbose human output.
pub(crate) const VERBOSE_HINT: &str = "Run with --verbose for full details";

/// Width of the `=` rule under section headers.
pub(crate) const RULE_WIDTH: usize = 50;

/// An output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Per-org sections grouped by state.
    Terminal { verbose: bool },
    /// Full structured dump.
    Json,
    /// Urgent/blocked counts per org.
    Compact,
    /// Cross-org session banner.
    Banner,
    /// Per-org sections grouped by project.
    Project { verbose: bool },
}

/// Format names and their constructors, in help order.
static FORMATS: [(&str, fn(bool) -> Formatter); 6] = [
    ("terminal", terminal_format),
    ("json", |_: bool| Formatter::Json),
    ("compact", |_: bool| Formatter::Compact),
    ("banner", |_: bool| Formatter::Banner),
    ("overwatch", |_: bool| Formatter::Banner),
    ("project", project_format),
];

fn terminal_format(verbose: bool) -> Formatter {
    Formatter::Terminal { verbose }
}

fn project_format(verbose: bool) -> Formatter {
    Formatter::Project { verbose }
}

impl Formatter {
    /// Look up a format by name. `verbose` only affects the terminal and
    /// project formats.
    pub fn from_name(name: &str, verbose: bool) -> Result<Self, UnknownFormat> {
        FORMATS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, build)| build(verbose))
            .ok_or_else(|| UnknownFormat {
                name: name.to_string(),
                choices: Self::names().collect::<Vec<_>>().join(", "),
            })
    }

    /// All accepted format names.
    pub fn names() -> impl Iterator<Item = &'static str> {
        FORMATS.iter().map(|(name, _)| *name)
    }

    /// Render aggregated todos.
    pub fn render(&self, data: &TodoMap) -> Result<String> {
        let output = match *self {
            Formatter::Terminal { verbose } => terminal::render_by_state(data, verbose),
            Formatter::Json => json::render(data)?,
            Formatter::Compact => summary::render_compact(data),
            Formatter::Banner => summary::render_banner(data),
            Formatter::Project { verbose } => terminal::render_by_project(data, verbose),
        };
        Ok(output)
    }
}

/// ` (3d)` for items with an age, empty otherwise.
pub(crate) fn age_suffix(todo: &TodoItem) -> String {
    if todo.age_days > 0 {
        format!(" ({}d)", todo.age_days)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::item;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(
            Formatter::from_name("terminal", true).unwrap(),
            Formatter::Terminal { verbose: true }
        );
        assert_eq!(Formatter::from_name("json", true).unwrap(), Formatter::Json);
        assert_eq!(
            Formatter::from_name("overwatch", false).unwrap(),
            Formatter::Banner
        );
        assert_eq!(
            Formatter::from_name("project", false).unwrap(),
            Formatter::Project { verbose: false }
        );
    }

    #[test]
    fn test_unknown_format() {
        let err = Formatter::from_name("xml", false).unwrap_err();
        assert_eq!(err.name, "xml");
        assert!(err.to_string().contains("terminal, json, compact"));
    }

    #[test]
    fn test_empty_data_renders_nothing() {
        let empty = TodoMap::new();
        let mut with_empty_org = TodoMap::new();
        with_empty_org.insert("acme".to_string(), Vec::new());

        for name in ["terminal", "compact", "banner", "project"] {
            let formatter = Formatter::from_name(name, false).unwrap();
            assert_eq!(formatter.render(&empty).unwrap(), "", "{}", name);
            assert_eq!(formatter.render(&with_empty_org).unwrap(), "", "{}", name);
        }
    }

    #[test]
    fn test_age_suffix() {
        let mut todo = item("api", "x");
        assert_eq!(age_suffix(&todo), "");
        todo.age_days = 4;
        assert_eq!(age_suffix(&todo), " (4d)");
    }
}
