//! Parser port (interface)

use crate::errors::Result;
use crate::features::parsing::domain::ParsedUnit;

/// Parses one source file into a [`ParsedUnit`]
pub trait SourceParser: Send + Sync {
    fn parse_unit(&self, rel_path: &str, source: &str) -> Result<ParsedUnit>;

    fn supports_extension(&self, ext: &str) -> bool;

    fn language_name(&self) -> &'static str;
}
