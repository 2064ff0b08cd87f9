//! Declaration text for cloning
//!
//! Renders members and types of a tree back to source text with every marker
//! annotation removed. Text declared in source is sliced from the original
//! file; cloned nodes carry their own text.

use super::node::{MemberId, MemberOrigin, TypeId, TypeOrigin};
use super::tree::SourceTree;
use crate::shared::models::{TextRange, TypeKind};
use crate::shared::utils::{annotation_removal_range, apply_edits, TextEdit};

const INDENT_UNIT: &str = "    ";

impl SourceTree {
    /// Slice `range` of a file with the marker annotations inside it removed
    pub fn text_without_markers(&self, ty: TypeId, range: TextRange) -> String {
        let file = self.file(self.ty(ty).file);
        let text = file.text.as_str();
        let edits: Vec<TextEdit> = file
            .marker_ranges
            .iter()
            .filter(|marker| range.contains(marker))
            .map(|&marker| {
                let removal = annotation_removal_range(text, marker);
                let clamped = TextRange::new(
                    removal.start.max(range.start),
                    removal.end.min(range.end),
                );
                TextEdit::delete(clamped.relative_to(range.start))
            })
            .collect();
        apply_edits(range.slice(text), &edits)
    }

    /// Indented declaration of a member, doc comment included, markers removed
    pub fn render_member(&self, id: MemberId) -> String {
        let member = self.member(id);
        let layout = match &member.origin {
            MemberOrigin::Cloned { text, .. } => return text.clone(),
            MemberOrigin::Source(layout) => layout,
        };
        let text = self.file(self.ty(member.owner).file).text.as_str();

        let declaration = match (layout.field_prefix, layout.declarator) {
            (Some(prefix), Some(declarator)) => format!(
                "{} {};",
                self.text_without_markers(member.owner, prefix).trim(),
                declarator.slice(text)
            ),
            _ => self
                .text_without_markers(member.owner, layout.decl_range)
                .trim_start()
                .to_string(),
        };

        let mut out = String::new();
        if let Some(doc) = layout.doc_range {
            out.push_str(&member.indent);
            out.push_str(doc.slice(text));
            out.push('\n');
        }
        out.push_str(&member.indent);
        out.push_str(&declaration);
        out
    }

    /// Declaration text of a type up to (not including) its opening brace
    pub fn type_header(&self, ty: TypeId) -> String {
        match &self.ty(ty).origin {
            TypeOrigin::Cloned { header, .. } => header.clone(),
            TypeOrigin::Source {
                decl_range,
                body_range,
                ..
            } => {
                let header = TextRange::new(decl_range.start, body_range.start);
                self.text_without_markers(ty, header).trim().to_string()
            }
        }
    }

    /// Indentation of the items inside a type body
    pub fn body_indent(&self, ty: TypeId) -> String {
        let node = self.ty(ty);
        node.members
            .first()
            .map(|&m| self.member(m).indent.clone())
            .filter(|indent| indent.len() > node.indent.len())
            .unwrap_or_else(|| format!("{}{}", node.indent, INDENT_UNIT))
    }

    /// Indented body items that are not members or types
    ///
    /// The enum constant list comes first and always ends with `;`.
    pub fn type_extras(&self, ty: TypeId) -> Vec<String> {
        let node = self.ty(ty);
        match &node.origin {
            TypeOrigin::Cloned { extras, .. } => extras.clone(),
            TypeOrigin::Source {
                enum_constants,
                extras,
                ..
            } => {
                let indent = self.body_indent(ty);
                let mut out = Vec::new();
                if let Some(constants) = enum_constants {
                    let list = self.text_without_markers(ty, *constants);
                    out.push(format!("{}{};", indent, list.trim()));
                } else if node.kind == TypeKind::Enum {
                    out.push(format!("{};", indent));
                }
                out.extend(extras.iter().map(|&extra| {
                    format!("{}{}", indent, self.text_without_markers(ty, extra).trim())
                }));
                out
            }
        }
    }

    /// Full indented declaration of a type from its current nodes
    ///
    /// Members and nested types come from the arena, so anything added to a
    /// cloned type after cloning is part of the output.
    pub fn render_type(&self, ty: TypeId) -> String {
        let node = self.ty(ty);
        let mut out = format!("{}{} {{\n", node.indent, self.type_header(ty));
        for extra in self.type_extras(ty) {
            out.push_str(&extra);
            out.push('\n');
        }
        for &member in &node.members {
            out.push_str(&self.render_member(member));
            out.push('\n');
        }
        for &nested in &node.nested {
            out.push_str(&self.render_type(nested));
            out.push('\n');
        }
        out.push_str(&node.indent);
        out.push('}');
        out
    }
}
