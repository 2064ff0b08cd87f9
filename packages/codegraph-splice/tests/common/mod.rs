//! Common test utilities for codegraph-splice
//!
//! Java fixture sources and a temp-dir workspace holding a common root, a
//! platform root and an output directory.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
