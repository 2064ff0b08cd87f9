//! Parsing feature
//!
//! Turns source files into [`ParsedUnit`]s: packages, imports, declared types,
//! members and markers, each with the byte ranges later text patching needs.
//! tree-sitter lives in `infrastructure` only.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{collect_sources, parse_sources};
pub use domain::{ImportDecl, ParseIssue, ParsedMember, ParsedType, ParsedUnit};
pub use infrastructure::JavaSourceParser;
pub use ports::SourceParser;
