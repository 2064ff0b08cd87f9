//! Serialization
//!
//! Turns the processed platform tree back into source files by editing the
//! original text, then runs the import repair pass over the result.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::TreeEmitter;
pub use domain::{EmitOrigin, EmittedFile};
pub use infrastructure::{repair, repair_file, write_emitted};
