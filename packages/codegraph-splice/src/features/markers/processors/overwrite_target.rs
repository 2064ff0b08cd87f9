//! Stage 5: required `@OverwriteTarget` enforcement

use tracing::debug;

use crate::errors::{Result, SpliceError};
use crate::features::common_cache::BuildContext;
use crate::features::markers::ports::{MarkerProcessor, ProcessStats};
use crate::features::source_tree::{SourceTree, TypeId};

/// Fails the build when a required common target has no platform type
#[derive(Debug, Default)]
pub struct OverwriteTargetProcessor;

impl MarkerProcessor for OverwriteTargetProcessor {
    fn name(&self) -> &'static str {
        "overwrite-target"
    }

    fn process_type(
        &self,
        _ctx: &BuildContext,
        _tree: &mut SourceTree,
        _ty: TypeId,
        _stats: &mut ProcessStats,
    ) -> Result<()> {
        Ok(())
    }

    fn finish(&self, ctx: &BuildContext, tree: &SourceTree) -> Result<()> {
        let common = ctx.common_tree();
        let missing: Vec<String> = ctx
            .common()
            .overwrite_targets()
            .iter()
            .map(|&target| common.ty(target).qualified_name.clone())
            .filter(|name| !tree.contains(name))
            .collect();

        if missing.is_empty() {
            debug!(
                "All {} overwrite targets are replaced",
                ctx.common().overwrite_targets().len()
            );
            return Ok(());
        }
        Err(SpliceError::MissingOverwrite { targets: missing })
    }
}
