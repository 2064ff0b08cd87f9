//! Serialization domain

mod emitted_file;

pub use emitted_file::{EmitOrigin, EmittedFile};
