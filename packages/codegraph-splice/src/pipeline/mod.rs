//! Pipeline orchestration

mod orchestrator;
mod result;

pub use orchestrator::SplicePipeline;
pub use result::{PipelineOutcome, PipelineStats, SpliceOutput};
