//! Source tree model
//!
//! In-memory packages → types → members view of one source root, built from
//! the parser's per-file results. Processors edit the platform tree in place;
//! the common tree stays read-only.

pub mod application;
pub mod domain;

pub use application::parse_tree;
pub use domain::{
    is_constant, FileId, MemberId, MemberLayout, MemberNode, MemberOrigin, SourceFile,
    SourceTree, TypeId, TypeNode, TypeOrigin,
};
