//! Stage 4: `@Overwrite`

use crate::errors::{Result, SpliceError};
use crate::features::common_cache::BuildContext;
use crate::features::markers::ports::{MarkerProcessor, ProcessStats};
use crate::features::source_tree::{SourceTree, TypeId};
use crate::shared::models::{MarkerKind, MarkerSet};

/// Checks that every `@Overwrite` member replaces some common member
///
/// Nothing is copied; the platform body stands as written.
#[derive(Debug, Default)]
pub struct OverwriteProcessor;

impl MarkerProcessor for OverwriteProcessor {
    fn name(&self) -> &'static str {
        "overwrite"
    }

    fn process_type(
        &self,
        ctx: &BuildContext,
        tree: &mut SourceTree,
        ty: TypeId,
        stats: &mut ProcessStats,
    ) -> Result<()> {
        let common_ty = ctx.counterpart(&tree.ty(ty).qualified_name);

        for member_id in tree.ty(ty).members.clone() {
            let member = tree.member(member_id);
            if !member.has_marker(&MarkerKind::Overwrite) {
                continue;
            }
            let matched = common_ty.and_then(|common_ty| {
                ctx.comparator()
                    .find_overridden(ctx.common_tree(), common_ty, member)
            });
            if matched.is_none() {
                return Err(SpliceError::NoOverwriteTarget {
                    subject: format!("member {}", tree.describe_member(member_id)),
                });
            }
            stats.markers_stripped += tree
                .member_mut(member_id)
                .strip_marker(&MarkerKind::Overwrite);
        }
        Ok(())
    }
}
