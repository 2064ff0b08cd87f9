//! Import repair on emitted text
//!
//! Line-based safety net over emitted files:
//!
//! - drops nested-type imports that were emitted as if the type were a
//!   package (the target is a dotted prefix of a sibling import), unless the
//!   common original has the same line or the code names the type
//! - restores wildcard and static imports the common original has but the
//!   emitted text lost, right after the package declaration
//!
//! Pure text in, text out; the tree model is never consulted.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::{Result, SpliceError};

static IMPORT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+(static\s+)?([A-Za-z_$][\w$]*(?:\s*\.\s*[A-Za-z_$][\w$]*)*)(\s*\.\s*\*)?\s*;")
        .expect("valid import regex")
});

static PACKAGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*package\s+[\w$.\s]+;").expect("valid package regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
struct ImportLine {
    target: String,
    is_static: bool,
    is_wildcard: bool,
}

impl ImportLine {
    fn parse(line: &str) -> Option<Self> {
        let caps = IMPORT_LINE.captures(line)?;
        Some(Self {
            target: caps[2].chars().filter(|c| !c.is_whitespace()).collect(),
            is_static: caps.get(1).is_some(),
            is_wildcard: caps.get(3).is_some(),
        })
    }

    fn render(&self) -> String {
        format!(
            "import {}{}{};",
            if self.is_static { "static " } else { "" },
            self.target,
            if self.is_wildcard { ".*" } else { "" }
        )
    }
}

/// Repair the imports of `emitted` against the common original
pub fn repair(emitted: &str, original_common: &str) -> String {
    let lines: Vec<&str> = emitted.split_inclusive('\n').collect();
    let imports: Vec<(usize, ImportLine)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| ImportLine::parse(line).map(|import| (i, import)))
        .collect();

    let original_imports: Vec<ImportLine> = original_common
        .lines()
        .filter_map(ImportLine::parse)
        .collect();
    let code: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !IMPORT_LINE.is_match(line) && !PACKAGE_LINE.is_match(line))
        .collect();

    let broken: Vec<usize> = imports
        .iter()
        .filter(|(_, import)| !import.is_static && !import.is_wildcard)
        .filter(|(i, import)| {
            let prefix = format!("{}.", import.target);
            imports
                .iter()
                .any(|(j, sibling)| j != i && sibling.target.starts_with(&prefix))
        })
        .filter(|(_, import)| !original_imports.contains(import))
        .filter(|(_, import)| !references_simple_name(&code, &import.target))
        .map(|(i, _)| *i)
        .collect();

    let kept: Vec<&ImportLine> = imports
        .iter()
        .filter(|(i, _)| !broken.contains(i))
        .map(|(_, import)| import)
        .collect();
    let mut restored: Vec<ImportLine> = Vec::new();
    for import in original_imports {
        if (import.is_static || import.is_wildcard)
            && !kept.contains(&&import)
            && !restored.contains(&import)
        {
            restored.push(import);
        }
    }

    if broken.is_empty() && restored.is_empty() {
        return emitted.to_string();
    }
    debug!(
        "Import repair: {} broken removed, {} restored",
        broken.len(),
        restored.len()
    );

    let package_line = lines.iter().position(|line| PACKAGE_LINE.is_match(line));
    let restored_text: String = restored
        .iter()
        .map(|import| format!("{}\n", import.render()))
        .collect();

    let mut out = String::with_capacity(emitted.len() + restored_text.len());
    if package_line.is_none() {
        out.push_str(&restored_text);
    }
    for (i, line) in lines.iter().enumerate() {
        if broken.contains(&i) {
            continue;
        }
        out.push_str(line);
        if Some(i) == package_line {
            if !line.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&restored_text);
        }
    }
    out
}

/// Whether the last segment of `target` appears as a word outside import lines
fn references_simple_name(code: &[&str], target: &str) -> bool {
    let name = target.rsplit('.').next().unwrap_or(target);
    let Ok(word) = Regex::new(&format!(r"(^|[^\w$]){}($|[^\w$])", regex::escape(name))) else {
        return false;
    };
    code.iter().any(|line| word.is_match(line))
}

/// Repair a written file in place; returns whether it changed
pub fn repair_file(path: &Path, common_path: &Path) -> Result<bool> {
    let emitted = fs::read_to_string(path).map_err(|e| SpliceError::io(path, e))?;
    let original = fs::read_to_string(common_path).map_err(|e| SpliceError::io(common_path, e))?;
    let repaired = repair(&emitted, &original);
    if repaired == emitted {
        return Ok(false);
    }
    fs::write(path, repaired).map_err(|e| SpliceError::io(path, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_clean_file_is_unchanged() {
        let emitted = "package a;\n\nimport java.util.List;\n\nclass A {}\n";
        assert_eq!(repair(emitted, emitted), emitted);
    }

    #[test]
    fn test_nested_type_import_treated_as_package_is_removed() {
        let emitted = "package a;\n\nimport b.Outer;\nimport b.Outer.Inner;\n\nclass A {}\n";
        assert_eq!(
            repair(emitted, ""),
            "package a;\n\nimport b.Outer.Inner;\n\nclass A {}\n"
        );
    }

    #[test]
    fn test_outer_import_used_by_code_is_kept() {
        let emitted = "package a;\n\nimport b.Outer;\nimport b.Outer.Inner;\n\nclass A extends Outer {}\n";
        assert_eq!(repair(emitted, ""), emitted);
    }

    #[test]
    fn test_outer_import_from_common_is_kept() {
        let emitted = "package a;\n\nimport b.Outer;\nimport b.Outer.Inner;\n\nclass A {}\n";
        let original = "package a;\n\nimport b.Outer;\n";
        assert_eq!(repair(emitted, original), emitted);
    }

    #[test]
    fn test_outer_name_as_substring_does_not_count() {
        let emitted = "package a;\n\nimport b.Outer;\nimport b.Outer.Inner;\n\nclass A { OuterView v; }\n";
        assert_eq!(
            repair(emitted, ""),
            "package a;\n\nimport b.Outer.Inner;\n\nclass A { OuterView v; }\n"
        );
    }

    #[test]
    fn test_dropped_static_and_wildcard_imports_are_restored() {
        let original = "package a;\n\nimport java.util.*;\nimport static java.lang.Math.max;\nimport java.io.File;\n";
        let emitted = "package a;\n\nimport java.io.File;\n\nclass A {}\n";
        assert_eq!(
            repair(emitted, original),
            "package a;\nimport java.util.*;\nimport static java.lang.Math.max;\n\nimport java.io.File;\n\nclass A {}\n"
        );
    }

    #[test]
    fn test_restored_without_package_go_first() {
        let original = "import static java.lang.Math.min;\n";
        assert_eq!(
            repair("class A {}\n", original),
            "import static java.lang.Math.min;\nclass A {}\n"
        );
    }

    #[test]
    fn test_repair_file_rewrites_once() {
        let dir = tempfile::tempdir().unwrap();
        let emitted = dir.path().join("A.java");
        let common = dir.path().join("common.java");
        fs::write(&emitted, "package a;\nclass A {}\n").unwrap();
        fs::write(&common, "package a;\nimport static x.Y.z;\n").unwrap();

        assert!(repair_file(&emitted, &common).unwrap());
        assert_eq!(
            fs::read_to_string(&emitted).unwrap(),
            "package a;\nimport static x.Y.z;\nclass A {}\n"
        );
        assert!(!repair_file(&emitted, &common).unwrap());
    }
}
