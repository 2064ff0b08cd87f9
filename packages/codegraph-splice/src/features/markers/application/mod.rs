//! Marker processing use cases

mod run_processors;

pub use run_processors::{default_processors, run_processors};
