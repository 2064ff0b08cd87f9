//! Parsing domain models

mod parsed_unit;

pub use parsed_unit::{ImportDecl, ParseIssue, ParsedMember, ParsedType, ParsedUnit};
