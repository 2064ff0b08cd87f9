//! Source tree use cases

pub mod build_tree;

pub use build_tree::parse_tree;
