//! Pipeline results

use serde::Serialize;

use crate::features::markers::ProcessStats;
use crate::features::serialization::EmittedFile;

/// Counters for one completed platform build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub platform_files: usize,
    pub process: ProcessStats,
    pub files_emitted: usize,
    pub files_repaired: usize,
    pub files_written: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PipelineOutcome {
    /// The platform root has no sources; nothing to validate
    Skipped,
    Completed(PipelineStats),
}

impl PipelineOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, PipelineOutcome::Skipped)
    }

    pub fn stats(&self) -> Option<&PipelineStats> {
        match self {
            PipelineOutcome::Skipped => None,
            PipelineOutcome::Completed(stats) => Some(stats),
        }
    }
}

/// Emitted files of a build, before anything is written
#[derive(Debug, Clone)]
pub struct SpliceOutput {
    pub files: Vec<EmittedFile>,
    pub stats: PipelineStats,
}

impl SpliceOutput {
    pub fn file(&self, rel_path: &str) -> Option<&EmittedFile> {
        self.files.iter().find(|f| f.rel_path == rel_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_json_shape() {
        let skipped = serde_json::to_value(PipelineOutcome::Skipped).unwrap();
        assert_eq!(skipped, serde_json::json!("Skipped"));

        let completed = serde_json::to_value(PipelineOutcome::Completed(PipelineStats {
            files_written: 3,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(completed["Completed"]["files_written"], 3);
        assert_eq!(completed["Completed"]["process"]["members_cloned"], 0);
    }
}
