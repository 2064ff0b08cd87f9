//! Type resolution feature
//!
//! Simple assignability over textual type references: identity, primitive
//! widening, `Object`, arrays and the declared class hierarchy.

pub mod domain;

pub use domain::{TypeFacts, BUILTIN_SUPERTYPES};
