//! Arena nodes
//!
//! Nodes refer to each other through copyable handles into the owning
//! [`SourceTree`](super::SourceTree) arenas, never through references.

use crate::features::parsing::ImportDecl;
use crate::shared::models::{
    Marker, MarkerSet, MemberKind, Modifiers, Span, Stage, TextRange, TypeKind, Visibility,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub(crate) usize);

impl FileId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl MemberId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One compilation unit of a tree
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the tree root, `/`-separated
    pub rel_path: String,
    /// Original text, never modified
    pub text: String,
    pub package: String,
    pub package_range: Option<TextRange>,
    pub imports: Vec<ImportDecl>,
    /// Imports pulled in with content cloned from another tree
    pub adopted_imports: Vec<ImportDecl>,
    /// Every marker annotation written in this file
    pub marker_ranges: Vec<TextRange>,
    /// Top-level types in declaration order
    pub types: Vec<TypeId>,
}

impl SourceFile {
    pub fn has_import(&self, import: &ImportDecl) -> bool {
        self.imports.iter().chain(&self.adopted_imports).any(|own| {
            own.target == import.target
                && own.is_static == import.is_static
                && own.is_wildcard == import.is_wildcard
        })
    }

    /// Record an import for cloned content; returns whether it was new
    pub fn adopt_import(&mut self, import: &ImportDecl) -> bool {
        if self.has_import(import) {
            return false;
        }
        self.adopted_imports.push(import.clone());
        true
    }
}

/// Where a type node came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOrigin {
    /// Declared in the tree's own text
    Source {
        decl_range: TextRange,
        /// `{` to `}` inclusive
        body_range: TextRange,
        enum_constants: Option<TextRange>,
        extras: Vec<TextRange>,
    },
    /// Cloned from another tree during processing
    Cloned {
        stage: Stage,
        /// Qualified name of the type it was cloned from
        from: String,
        /// Declaration text up to the opening brace, markers removed
        header: String,
        /// Indented body items other than members and nested types
        extras: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub name: String,
    pub qualified_name: String,
    pub package: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub markers: Vec<Marker>,
    pub supertypes: Vec<String>,
    pub file: FileId,
    pub parent: Option<TypeId>,
    pub members: Vec<MemberId>,
    pub nested: Vec<TypeId>,
    pub indent: String,
    pub span: Span,
    pub origin: TypeOrigin,
}

impl TypeNode {
    pub fn is_cloned(&self) -> bool {
        matches!(self.origin, TypeOrigin::Cloned { .. })
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

impl MarkerSet for TypeNode {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn markers_mut(&mut self) -> &mut Vec<Marker> {
        &mut self.markers
    }
}

/// Text positions of a member declared in source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberLayout {
    pub decl_range: TextRange,
    /// Fields only: modifiers and declared type
    pub field_prefix: Option<TextRange>,
    /// Fields only: `name = value`
    pub declarator: Option<TextRange>,
    /// Block, `;` of a bodiless method, or field initializer
    pub body_range: Option<TextRange>,
    pub doc_range: Option<TextRange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberOrigin {
    Source(MemberLayout),
    Cloned {
        stage: Stage,
        /// Qualified owner name and description of the member it was cloned from
        from: String,
        /// Full declaration text, indented, markers removed
        text: String,
    },
}

#[derive(Debug, Clone)]
pub struct MemberNode {
    pub owner: TypeId,
    pub kind: MemberKind,
    /// `<init>` for constructors
    pub name: String,
    pub params: Vec<String>,
    /// Return type, declared field type, or owner name for constructors
    pub return_type: String,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub markers: Vec<Marker>,
    /// Block text, or initializer expression for fields; `None` when absent
    pub body: Option<String>,
    /// Body taken from another tree
    pub body_replaced: bool,
    pub indent: String,
    pub span: Span,
    pub origin: MemberOrigin,
}

impl MemberNode {
    pub fn is_cloned(&self) -> bool {
        matches!(self.origin, MemberOrigin::Cloned { .. })
    }

    pub fn layout(&self) -> Option<&MemberLayout> {
        match &self.origin {
            MemberOrigin::Source(layout) => Some(layout),
            MemberOrigin::Cloned { .. } => None,
        }
    }

    /// `name(p1,p2)` for methods and constructors, `name` for fields
    pub fn signature(&self) -> String {
        match self.kind {
            MemberKind::Field => self.name.clone(),
            MemberKind::Method | MemberKind::Constructor => {
                format!("{}({})", self.name, self.params.join(","))
            }
        }
    }
}

impl MarkerSet for MemberNode {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn markers_mut(&mut self) -> &mut Vec<Marker> {
        &mut self.markers
    }
}
