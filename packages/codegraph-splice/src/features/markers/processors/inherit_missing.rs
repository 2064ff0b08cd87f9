//! Stage 1: `@InheritMissingMembers`

use crate::errors::{Result, SpliceError};
use crate::features::common_cache::BuildContext;
use crate::features::markers::ports::{MarkerProcessor, ProcessStats};
use crate::features::source_tree::{SourceTree, TypeId};
use crate::shared::models::{MarkerKind, MarkerSet, Stage};

use super::clone::{adopt_imports, clone_member, clone_nested_type};

/// Pulls every common member the platform type does not already override
///
/// Only members the platform declared before the stage count as overrides,
/// so every common overload is copied. Running the stage again is a no-op.
#[derive(Debug, Default)]
pub struct InheritMissingMembersProcessor;

impl MarkerProcessor for InheritMissingMembersProcessor {
    fn name(&self) -> &'static str {
        Stage::InheritMissingMembers.as_str()
    }

    fn process_type(
        &self,
        ctx: &BuildContext,
        tree: &mut SourceTree,
        ty: TypeId,
        stats: &mut ProcessStats,
    ) -> Result<()> {
        if !tree.ty(ty).has_marker(&MarkerKind::InheritMissingMembers) {
            return Ok(());
        }
        let qualified_name = tree.ty(ty).qualified_name.clone();
        let common_ty = ctx
            .counterpart(&qualified_name)
            .ok_or_else(|| SpliceError::NoOverwriteTarget {
                subject: format!("type {}", qualified_name),
            })?;

        stats.markers_stripped += tree
            .ty_mut(ty)
            .strip_marker(&MarkerKind::InheritMissingMembers);
        inherit_missing_members(ctx, tree, ty, common_ty, stats);
        Ok(())
    }
}

/// Bring `ty` up to the member set of `common_ty`, recursing into nested types
pub fn inherit_missing_members(
    ctx: &BuildContext,
    tree: &mut SourceTree,
    ty: TypeId,
    common_ty: TypeId,
    stats: &mut ProcessStats,
) {
    let common = ctx.common_tree();
    let stage = Stage::InheritMissingMembers;
    let before = (stats.members_cloned, stats.types_cloned);
    // Clones made below never count as overrides of their own siblings
    let declared = tree.ty(ty).members.clone();

    for (member_id, member) in common.members_of(common_ty) {
        if member.has_marker(&MarkerKind::PlatformMustOverwrite) {
            continue;
        }
        if ctx.comparator().any_overrides(tree, &declared, member) {
            continue;
        }
        clone_member(common, member_id, tree, ty, stage);
        stats.members_cloned += 1;
    }

    for &common_nested in &common.ty(common_ty).nested {
        let name = &common.ty(common_nested).name;
        match tree.nested_named(ty, name) {
            Some(platform_nested) => {
                inherit_missing_members(ctx, tree, platform_nested, common_nested, stats)
            }
            None => {
                clone_nested_type(
                    common,
                    common_nested,
                    tree,
                    ty,
                    stage,
                    &mut stats.members_cloned,
                );
                stats.types_cloned += 1;
            }
        }
    }

    if (stats.members_cloned, stats.types_cloned) != before {
        adopt_imports(common, common_ty, tree, ty);
    }
}
