//! Source tree domain model

pub mod node;
pub mod render;
pub mod tree;

pub use node::{
    FileId, MemberId, MemberLayout, MemberNode, MemberOrigin, SourceFile, TypeId, TypeNode,
    TypeOrigin,
};
pub use tree::{is_constant, SourceTree};
