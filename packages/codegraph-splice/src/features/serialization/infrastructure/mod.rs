//! Serialization infrastructure: text repair and file output

mod patch_up;
mod writer;

pub use patch_up::{repair, repair_file};
pub use writer::write_emitted;
