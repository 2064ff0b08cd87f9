//! Feature modules
//!
//! Leaves first: parsing and the source tree model, type facts and the member
//! comparator, the common-tree cache, then marker processing, validation and
//! serialization.

pub mod common_cache;
pub mod comparator;
pub mod markers;
pub mod parsing;
pub mod serialization;
pub mod source_tree;
pub mod type_resolution;
pub mod validation;
