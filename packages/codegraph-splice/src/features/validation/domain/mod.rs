//! Validation domain

pub mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticCategory, ValidationReport};
