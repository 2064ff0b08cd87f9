//! Tree → source text
//!
//! Each platform file is its original text plus a set of edits: marker
//! annotations removed, inherited bodies replaced, provenance comments and
//! cloned declarations inserted, adopted imports added. Text no stage touched
//! is emitted byte for byte.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::features::serialization::domain::EmittedFile;
use crate::features::source_tree::{
    FileId, MemberNode, MemberOrigin, SourceTree, TypeId, TypeOrigin,
};
use crate::shared::models::{MarkerSet, MemberKind, Stage, TextRange};
use crate::shared::utils::{annotation_removal_range, apply_edits, TextEdit};

pub struct TreeEmitter {
    provenance_tag: String,
}

impl TreeEmitter {
    pub fn new(provenance_tag: impl Into<String>) -> Self {
        Self {
            provenance_tag: provenance_tag.into(),
        }
    }

    fn provenance_comment(&self, indent: &str, stage: Stage) -> String {
        format!("{}// generated by {} ({})\n", indent, self.provenance_tag, stage)
    }

    /// Every file of the platform tree
    pub fn emit_platform(&self, tree: &SourceTree) -> Vec<EmittedFile> {
        tree.file_ids()
            .map(|file| EmittedFile::platform(&tree.file(file).rel_path, self.emit_file(tree, file)))
            .collect()
    }

    /// Common files whose types the platform does not replace, markers removed
    pub fn emit_common(&self, common: &SourceTree, platform: &SourceTree) -> Vec<EmittedFile> {
        common
            .file_ids()
            .filter_map(|id| {
                let file = common.file(id);
                let replaced = platform.file_by_path(&file.rel_path).is_some()
                    || file
                        .types
                        .iter()
                        .any(|&ty| platform.contains(&common.ty(ty).qualified_name));
                if replaced {
                    return None;
                }
                let edits = marker_edits(&file.text, &file.marker_ranges);
                Some(EmittedFile::common(&file.rel_path, apply_edits(&file.text, &edits)))
            })
            .collect()
    }

    pub fn emit_file(&self, tree: &SourceTree, id: FileId) -> String {
        let file = tree.file(id);
        let text = file.text.as_str();
        let mut edits = marker_edits(text, &file.marker_ranges);

        let mut commented: FxHashSet<usize> = FxHashSet::default();
        for ty in tree.type_ids().filter(|&ty| tree.ty(ty).file == id) {
            let TypeOrigin::Source { body_range, .. } = &tree.ty(ty).origin else {
                continue;
            };

            for (_, member) in tree.members_of(ty) {
                let MemberOrigin::Source(layout) = &member.origin else {
                    continue;
                };
                if member.body_replaced {
                    edits.extend(body_edit(text, member));
                }
                if let Some(stage) = member.provenance() {
                    let at = line_start(text, layout.decl_range.start);
                    if commented.insert(at) {
                        edits.push(TextEdit::insert(at, self.provenance_comment(&member.indent, stage)));
                    }
                }
            }

            if let Some(insertion) = self.cloned_children(tree, ty, text, *body_range) {
                edits.push(insertion);
            }
        }

        if let Some(imports) = import_edit(tree, id) {
            edits.push(imports);
        }

        debug!("Emitting {} with {} edits", file.rel_path, edits.len());
        apply_edits(text, &edits)
    }

    /// Cloned members and nested types of `ty`, inserted before its closing brace
    fn cloned_children(
        &self,
        tree: &SourceTree,
        ty: TypeId,
        text: &str,
        body_range: TextRange,
    ) -> Option<TextEdit> {
        let node = tree.ty(ty);
        let mut blocks = Vec::new();
        for (member_id, member) in tree.members_of(ty) {
            if let MemberOrigin::Cloned { stage, .. } = &member.origin {
                blocks.push(format!(
                    "{}{}\n",
                    self.provenance_comment(&member.indent, *stage),
                    tree.render_member(member_id)
                ));
            }
        }
        for &nested in &node.nested {
            if let TypeOrigin::Cloned { stage, .. } = &tree.ty(nested).origin {
                blocks.push(format!(
                    "{}{}\n",
                    self.provenance_comment(&tree.ty(nested).indent, *stage),
                    tree.render_type(nested)
                ));
            }
        }
        if blocks.is_empty() {
            return None;
        }

        let close = body_range.end.saturating_sub(1);
        let brace_line = line_start(text, close);
        let (at, lead) = if text[brace_line..close].trim().is_empty() && brace_line > body_range.start {
            (brace_line, "")
        } else {
            (close, "\n")
        };
        let separator = if text[..at].trim_end().ends_with('{') { "" } else { "\n" };

        Some(TextEdit::insert(
            at,
            format!("{}{}{}", lead, separator, blocks.join("\n")),
        ))
    }
}

/// Deletions for every marker annotation in a file
fn marker_edits(text: &str, marker_ranges: &[TextRange]) -> Vec<TextEdit> {
    marker_ranges
        .iter()
        .map(|&range| TextEdit::delete(annotation_removal_range(text, range)))
        .collect()
}

/// Replace a member's body with the one it inherited
fn body_edit(text: &str, member: &MemberNode) -> Option<TextEdit> {
    let layout = member.layout()?;
    match member.kind {
        MemberKind::Method | MemberKind::Constructor => {
            let range = layout.body_range?;
            let replacement = match &member.body {
                Some(body) if range.slice(text) == ";" => format!(" {}", body),
                Some(body) => body.clone(),
                None => ";".to_string(),
            };
            Some(TextEdit::replace(range, replacement))
        }
        MemberKind::Field => {
            let declarator = layout.declarator?;
            match (layout.body_range, &member.body) {
                (Some(range), Some(body)) => Some(TextEdit::replace(range, body.clone())),
                (None, Some(body)) => Some(TextEdit::insert(declarator.end, format!(" = {}", body))),
                (Some(_), None) => {
                    let name = declarator.slice(text).split('=').next().unwrap_or("").trim_end();
                    Some(TextEdit::replace(declarator, name.to_string()))
                }
                (None, None) => None,
            }
        }
    }
}

/// Adopted imports, after the last import or the package declaration
fn import_edit(tree: &SourceTree, id: FileId) -> Option<TextEdit> {
    let file = tree.file(id);
    if file.adopted_imports.is_empty() {
        return None;
    }
    let lines: Vec<String> = file
        .adopted_imports
        .iter()
        .filter(|import| !is_same_package(&file.package, &import.target) || import.is_static)
        .map(|import| import.render())
        .collect();
    if lines.is_empty() {
        return None;
    }

    let edit = match (file.imports.last(), file.package_range) {
        (Some(last), _) => TextEdit::insert(last.range.end, format!("\n{}", lines.join("\n"))),
        (None, Some(package)) => {
            TextEdit::insert(package.end, format!("\n\n{}", lines.join("\n")))
        }
        (None, None) => TextEdit::insert(0, format!("{}\n\n", lines.join("\n"))),
    };
    Some(edit)
}

/// `pkg.Type` imported into `pkg` itself
fn is_same_package(package: &str, target: &str) -> bool {
    target
        .rsplit_once('.')
        .is_some_and(|(prefix, _)| prefix == package)
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}
