//! Parsing use cases

mod parse_sources;

pub use parse_sources::{collect_sources, parse_sources};
