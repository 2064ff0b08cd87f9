//! Shared domain models

pub mod decl;
pub mod marker;
pub mod span;

pub use decl::{MemberKind, Modifiers, TypeKind, Visibility, CONSTRUCTOR_NAME};
pub use marker::{Marker, MarkerKind, MarkerSet, Stage};
pub use span::{Span, TextRange};
