//! Type resolution domain

pub mod builtin_types;
pub mod type_facts;

pub use builtin_types::{primitive_widens_to, BUILTIN_SUPERTYPES};
pub use type_facts::TypeFacts;
