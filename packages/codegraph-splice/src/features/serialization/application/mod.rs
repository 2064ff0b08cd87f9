//! Serialization use cases

mod emit_tree;

pub use emit_tree::TreeEmitter;
