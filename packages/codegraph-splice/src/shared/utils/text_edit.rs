//! Byte-range text edits
//!
//! Emission never re-prints a syntax tree; it applies edits to the original
//! text so everything the pipeline did not touch stays byte-identical.

use crate::shared::models::TextRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn delete(range: TextRange) -> Self {
        Self {
            range,
            replacement: String::new(),
        }
    }

    pub fn replace(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(TextRange::at(offset), text)
    }
}

/// Apply edits to `text`
///
/// Edits are applied in offset order. Exact duplicates collapse into one;
/// an edit overlapping an already applied one is dropped. Insertions at the
/// same offset keep their relative order.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.range.start, e.range.end));
    ordered.dedup_by(|a, b| a == b && !a.range.is_empty());

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in ordered {
        if edit.range.start < cursor || edit.range.end > text.len() {
            continue;
        }
        out.push_str(&text[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Widen an annotation range so deleting it leaves no gap
///
/// An annotation alone on its line takes the whole line (indent and newline)
/// with it; otherwise the spaces that follow it go too.
pub fn annotation_removal_range(text: &str, range: TextRange) -> TextRange {
    let line_start = text[..range.start].rfind('\n').map_or(0, |i| i + 1);
    let alone_before = text[line_start..range.start]
        .chars()
        .all(|c| c == ' ' || c == '\t');

    let rest = &text[range.end..];
    let spaces = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let after = range.end + spaces;
    let tail = &text[after..];

    if alone_before {
        if tail.starts_with("\r\n") {
            return TextRange::new(line_start, after + 2);
        }
        if tail.starts_with('\n') {
            return TextRange::new(line_start, after + 1);
        }
    }
    TextRange::new(range.start, after)
}
