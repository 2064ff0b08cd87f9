//! Cross-tree validation
//!
//! A final full sweep after the marker stages. Findings are collected across
//! the whole tree and reported together.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::Validator;
pub use domain::{Diagnostic, DiagnosticCategory, ValidationReport};
pub use infrastructure::DiagnosticRenderer;
