use serde::Serialize;

use crate::errors::Result;
use crate::features::common_cache::BuildContext;
use crate::features::source_tree::{SourceTree, TypeId};

/// Counters collected while processing one platform tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub types_processed: usize,
    pub members_cloned: usize,
    pub types_cloned: usize,
    pub bodies_inherited: usize,
    pub markers_stripped: usize,
}

/// One marker-driven pass over the platform tree
///
/// `process_type` runs once per platform type in a fixed stage order and may
/// edit the platform tree; the common tree is only read through the context.
/// `finish` runs once after every type went through every stage.
pub trait MarkerProcessor: Send + Sync {
    /// Stage name for logs
    fn name(&self) -> &'static str;

    fn process_type(
        &self,
        ctx: &BuildContext,
        tree: &mut SourceTree,
        ty: TypeId,
        stats: &mut ProcessStats,
    ) -> Result<()>;

    fn finish(&self, _ctx: &BuildContext, _tree: &SourceTree) -> Result<()> {
        Ok(())
    }
}
