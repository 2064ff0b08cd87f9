//! Parsing infrastructure (tree-sitter)

mod java_parser;

pub use java_parser::JavaSourceParser;
