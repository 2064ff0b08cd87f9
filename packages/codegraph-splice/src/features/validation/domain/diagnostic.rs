//! Validation findings
//!
//! Pure data; rendering lives in the infrastructure layer.

use std::fmt;

use serde::Serialize;

use crate::errors::{Result, SpliceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiagnosticCategory {
    /// Common members the platform type lacks
    MissingMembers,
    /// Platform constants that shadow a common constant with another value
    UnreachableMembers,
    /// `@OverwriteClass` types without a common counterpart
    NoTargetsFound,
}

impl DiagnosticCategory {
    pub const ALL: [DiagnosticCategory; 3] = [
        DiagnosticCategory::MissingMembers,
        DiagnosticCategory::UnreachableMembers,
        DiagnosticCategory::NoTargetsFound,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticCategory::MissingMembers => "Missing members",
            DiagnosticCategory::UnreachableMembers => "Unreachable members",
            DiagnosticCategory::NoTargetsFound => "No targets found",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Findings of one category for one platform type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    /// Qualified name of the offending platform type
    pub type_name: String,
    /// Formatted member or path descriptions
    pub entries: Vec<String>,
}

/// All findings of one validation sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add entries for a type; empty entry lists are ignored
    pub fn push(
        &mut self,
        category: DiagnosticCategory,
        type_name: impl Into<String>,
        entries: Vec<String>,
    ) {
        if entries.is_empty() {
            return;
        }
        let type_name = type_name.into();
        if let Some(existing) = self
            .diagnostics
            .iter_mut()
            .find(|d| d.category == category && d.type_name == type_name)
        {
            existing.entries.extend(entries);
            return;
        }
        self.diagnostics.push(Diagnostic {
            category,
            type_name,
            entries,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn by_category(&self, category: DiagnosticCategory) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.category == category)
    }

    /// Every entry of a category across all types
    pub fn entries(&self, category: DiagnosticCategory) -> Vec<&str> {
        self.by_category(category)
            .flat_map(|d| d.entries.iter().map(String::as_str))
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.diagnostics.iter().map(|d| d.entries.len()).sum()
    }

    /// `Ok` when clean, otherwise the report as a `ValidationFailure`
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SpliceError::ValidationFailure(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<String> = DiagnosticCategory::ALL
            .iter()
            .filter_map(|&category| {
                let count = self.entries(category).len();
                (count > 0).then(|| format!("{} {}", count, category.title().to_lowercase()))
            })
            .collect();
        if counts.is_empty() {
            f.write_str("no findings")
        } else {
            f.write_str(&counts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_groups_by_type_and_category() {
        let mut report = ValidationReport::new();
        report.push(DiagnosticCategory::MissingMembers, "a.Foo", vec!["Foo#a() -> int".into()]);
        report.push(DiagnosticCategory::MissingMembers, "a.Foo", vec!["Foo#b() -> int".into()]);
        report.push(DiagnosticCategory::UnreachableMembers, "a.Foo", vec!["Foo#X -> int".into()]);
        report.push(DiagnosticCategory::NoTargetsFound, "a.Bar", vec![]);

        assert_eq!(report.diagnostics().len(), 2);
        assert_eq!(
            report.entries(DiagnosticCategory::MissingMembers),
            vec!["Foo#a() -> int", "Foo#b() -> int"]
        );
        assert_eq!(report.to_string(), "2 missing members, 1 unreachable members");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationReport::new().into_result().is_ok());

        let mut report = ValidationReport::new();
        report.push(DiagnosticCategory::NoTargetsFound, "a.Bar", vec!["Bar".into()]);
        let err = report.into_result().unwrap_err();
        assert!(err.is_validation_failure());
        assert_eq!(err.to_string(), "Validation failed: 1 no targets found");
    }
}
