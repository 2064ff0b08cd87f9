//! Per-file parse result
//!
//! An owned, nested snapshot of one compilation unit. The source tree model
//! flattens these into its arena.

use crate::shared::models::{
    Marker, MemberKind, Modifiers, Span, TextRange, TypeKind, Visibility,
};

/// Parsed compilation unit
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    /// Path relative to the tree root, `/`-separated
    pub rel_path: String,
    pub source: String,
    /// Dotted package name, empty for the default package
    pub package: String,
    /// Range of the whole `package ...;` declaration
    pub package_range: Option<TextRange>,
    pub imports: Vec<ImportDecl>,
    /// Top-level types in declaration order
    pub types: Vec<ParsedType>,
    /// Recoverable syntax problems
    pub issues: Vec<ParseIssue>,
}

impl ParsedUnit {
    pub fn new(rel_path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            source: source.into(),
            package: String::new(),
            package_range: None,
            imports: Vec::new(),
            types: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// `import` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported name without `static` or `.*`
    pub target: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub range: TextRange,
}

impl ImportDecl {
    /// Canonical source line for this import
    pub fn render(&self) -> String {
        format!(
            "import {}{}{};",
            if self.is_static { "static " } else { "" },
            self.target,
            if self.is_wildcard { ".*" } else { "" }
        )
    }
}

#[derive(Debug, Clone)]
pub struct ParseIssue {
    pub message: String,
    pub span: Span,
}

/// Declared type with its members and nested types
#[derive(Debug, Clone)]
pub struct ParsedType {
    pub name: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub markers: Vec<Marker>,
    /// Declared supertypes as written (`extends` and `implements`)
    pub supertypes: Vec<String>,
    /// Whole declaration, modifiers included
    pub decl_range: TextRange,
    /// Body from `{` to `}` inclusive
    pub body_range: TextRange,
    /// Whitespace preceding the declaration on its line
    pub indent: String,
    /// Enum constant list, `A, B(1), C` without the terminating `;`
    pub enum_constants: Option<TextRange>,
    /// Initializer blocks and other body items that are neither members nor types
    pub extras: Vec<TextRange>,
    pub members: Vec<ParsedMember>,
    pub nested: Vec<ParsedType>,
    pub span: Span,
}

/// Method, constructor or field declaration
#[derive(Debug, Clone)]
pub struct ParsedMember {
    pub kind: MemberKind,
    pub name: String,
    pub params: Vec<String>,
    /// Return type, declared field type, or the owner's name for constructors
    pub return_type: String,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub markers: Vec<Marker>,
    /// Whole declaration, modifiers included
    pub decl_range: TextRange,
    /// Fields only: declaration start up to the end of the declared type
    pub field_prefix: Option<TextRange>,
    /// Fields only: this member's `name = value` declarator
    pub declarator: Option<TextRange>,
    /// Method/constructor block, `;` of an abstract method, or a field initializer
    pub body_range: Option<TextRange>,
    pub indent: String,
    /// Javadoc comment directly preceding the declaration
    pub doc_range: Option<TextRange>,
    pub span: Span,
}
