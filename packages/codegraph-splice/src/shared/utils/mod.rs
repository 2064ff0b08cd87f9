//! Shared utilities

pub mod text_edit;
pub mod type_names;

pub use text_edit::{annotation_removal_range, apply_edits, TextEdit};
pub use type_names::{simple_name, TypeShape};
