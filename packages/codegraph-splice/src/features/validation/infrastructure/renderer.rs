//! Human-readable diagnostic output
//!
//! One block per category, one group per offending type:
//!
//! ```text
//! Missing members:
//!   a.Foo
//!     - Foo#bar() -> int
//! ```

use colored::Colorize;

use crate::features::validation::domain::{DiagnosticCategory, ValidationReport};

#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticRenderer {
    color: bool,
}

impl DiagnosticRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, report: &ValidationReport) -> String {
        let mut out = String::new();
        for category in DiagnosticCategory::ALL {
            let mut diagnostics = report.by_category(category).peekable();
            if diagnostics.peek().is_none() {
                continue;
            }
            out.push_str(&self.title(category));
            out.push('\n');
            for diagnostic in diagnostics {
                out.push_str("  ");
                out.push_str(&self.type_name(&diagnostic.type_name));
                out.push('\n');
                for entry in &diagnostic.entries {
                    out.push_str("    - ");
                    out.push_str(entry);
                    out.push('\n');
                }
            }
        }
        out
    }

    fn title(&self, category: DiagnosticCategory) -> String {
        let title = format!("{}:", category.title());
        if !self.color {
            return title;
        }
        match category {
            DiagnosticCategory::MissingMembers => title.red().bold().to_string(),
            DiagnosticCategory::UnreachableMembers => title.yellow().bold().to_string(),
            DiagnosticCategory::NoTargetsFound => title.magenta().bold().to_string(),
        }
    }

    fn type_name(&self, name: &str) -> String {
        if self.color {
            name.bold().to_string()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_rendering() {
        let mut report = ValidationReport::new();
        report.push(
            DiagnosticCategory::UnreachableMembers,
            "a.Foo",
            vec!["Foo#X -> int".into()],
        );
        report.push(
            DiagnosticCategory::MissingMembers,
            "a.Foo",
            vec!["Foo#bar() -> int".into(), "Foo.Inner#ping() -> void".into()],
        );

        let rendered = DiagnosticRenderer::new(false).render(&report);
        assert_eq!(
            rendered,
            "Missing members:\n  a.Foo\n    - Foo#bar() -> int\n    - Foo.Inner#ping() -> void\n\
             Unreachable members:\n  a.Foo\n    - Foo#X -> int\n"
        );
    }

    #[test]
    fn test_empty_report_renders_nothing() {
        assert_eq!(DiagnosticRenderer::new(true).render(&ValidationReport::new()), "");
    }
}
