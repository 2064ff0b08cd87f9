//! Stage 2: `@Inherit`, `@PlatformMustOverwrite` and `@PlatformMustInherit`

use tracing::debug;

use crate::errors::{Result, SpliceError};
use crate::features::common_cache::BuildContext;
use crate::features::markers::ports::{MarkerProcessor, ProcessStats};
use crate::features::source_tree::{SourceTree, TypeId};
use crate::shared::models::{MarkerKind, MarkerSet, Stage};

use super::clone::adopt_imports;

/// Replaces bodies of `@Inherit` members with the common body
///
/// Also enforces the common-side contracts: a `@PlatformMustOverwrite` member
/// cannot be inherited, and a `@PlatformMustInherit` member cannot be
/// reimplemented. Members cloned by an earlier stage count as inherited.
#[derive(Debug, Default)]
pub struct InheritProcessor;

impl MarkerProcessor for InheritProcessor {
    fn name(&self) -> &'static str {
        Stage::Inherit.as_str()
    }

    fn process_type(
        &self,
        ctx: &BuildContext,
        tree: &mut SourceTree,
        ty: TypeId,
        stats: &mut ProcessStats,
    ) -> Result<()> {
        let common = ctx.common_tree();
        let common_ty = ctx.counterpart(&tree.ty(ty).qualified_name);

        for member_id in tree.ty(ty).members.clone() {
            let member = tree.member(member_id);

            if !member.has_marker(&MarkerKind::Inherit) {
                let Some(common_ty) = common_ty else {
                    continue;
                };
                if member.provenance().is_some() {
                    continue;
                }
                let overridden = ctx.comparator().find_overridden(common, common_ty, member);
                if let Some(parent) = overridden {
                    if common.member(parent).has_marker(&MarkerKind::PlatformMustInherit) {
                        return Err(SpliceError::MissingInherit {
                            member: tree.describe_member(member_id),
                        });
                    }
                }
                continue;
            }

            let parent = common_ty
                .and_then(|common_ty| ctx.comparator().find_overridden(common, common_ty, member))
                .ok_or_else(|| SpliceError::NoInheritTarget {
                    member: tree.describe_member(member_id),
                })?;
            let parent_node = common.member(parent);
            if parent_node.has_marker(&MarkerKind::PlatformMustOverwrite) {
                return Err(SpliceError::IllegalOverwrite {
                    member: tree.describe_member(member_id),
                });
            }

            let body = parent_node.body.clone();
            let node = tree.member_mut(member_id);
            node.body = body;
            node.body_replaced = true;
            stats.markers_stripped += node.strip_marker(&MarkerKind::Inherit);
            node.stamp_provenance(Stage::Inherit);
            stats.bodies_inherited += 1;
            debug!(
                "Inherited body of {} from {}",
                tree.describe_member(member_id),
                common.describe_member(parent)
            );

            if let Some(common_ty) = common_ty {
                adopt_imports(common, common_ty, tree, ty);
            }
        }
        Ok(())
    }
}
