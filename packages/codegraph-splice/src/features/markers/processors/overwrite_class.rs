//! Stage 3: `@OverwriteClass`

use tracing::debug;

use crate::errors::{Result, SpliceError};
use crate::features::common_cache::BuildContext;
use crate::features::markers::ports::{MarkerProcessor, ProcessStats};
use crate::features::source_tree::{SourceTree, TypeId};
use crate::shared::models::{MarkerKind, MarkerSet};

/// Asserts that a replacing type has a common counterpart
#[derive(Debug, Default)]
pub struct OverwriteClassProcessor;

impl MarkerProcessor for OverwriteClassProcessor {
    fn name(&self) -> &'static str {
        "overwrite-class"
    }

    fn process_type(
        &self,
        ctx: &BuildContext,
        tree: &mut SourceTree,
        ty: TypeId,
        stats: &mut ProcessStats,
    ) -> Result<()> {
        if !tree.ty(ty).has_marker(&MarkerKind::OverwriteClass) {
            return Ok(());
        }
        let qualified_name = &tree.ty(ty).qualified_name;
        if ctx.counterpart(qualified_name).is_none() {
            return Err(SpliceError::NoOverwriteTarget {
                subject: format!("type {}", qualified_name),
            });
        }
        debug!("{} overwrites its common counterpart", qualified_name);
        stats.markers_stripped += tree.ty_mut(ty).strip_marker(&MarkerKind::OverwriteClass);
        Ok(())
    }
}
