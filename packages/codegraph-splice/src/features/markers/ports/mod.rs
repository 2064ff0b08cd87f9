//! Marker processor port

mod processor;

pub use processor::{MarkerProcessor, ProcessStats};
