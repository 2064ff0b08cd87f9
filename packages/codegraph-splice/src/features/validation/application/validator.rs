//! Cross-tree validation sweep

use tracing::{debug, info};

use crate::features::common_cache::BuildContext;
use crate::features::source_tree::{is_constant, MemberNode, SourceTree, TypeId};
use crate::features::validation::domain::{DiagnosticCategory, ValidationReport};
use crate::shared::models::{MarkerKind, MarkerSet};
use crate::shared::utils::type_names::normalize;

/// Diffs the platform tree against the common tree
///
/// Findings are aggregated, never fatal on their own:
///
/// - missing members: public, non-constant common members without a
///   structural counterpart in the platform type
/// - unreachable members: platform constants redeclaring a common constant
///   (same name and type) with a different value expression
/// - no targets found: `@OverwriteClass` types without a common counterpart
pub struct Validator<'a> {
    ctx: &'a BuildContext,
}

impl<'a> Validator<'a> {
    pub fn new(ctx: &'a BuildContext) -> Self {
        Self { ctx }
    }

    pub fn validate(&self, tree: &SourceTree) -> ValidationReport {
        let mut report = ValidationReport::new();

        for ty in tree.all_types() {
            let node = tree.ty(ty);
            let counterpart = self.ctx.counterpart(&node.qualified_name);

            if counterpart.is_none() && node.has_marker(&MarkerKind::OverwriteClass) {
                report.push(
                    DiagnosticCategory::NoTargetsFound,
                    node.qualified_name.clone(),
                    vec![tree.nesting_path(ty)],
                );
            }

            let Some(common_ty) = counterpart else {
                continue;
            };
            if !node.is_top_level() {
                continue;
            }
            report.push(
                DiagnosticCategory::MissingMembers,
                node.qualified_name.clone(),
                self.missing_members(tree, common_ty),
            );
            report.push(
                DiagnosticCategory::UnreachableMembers,
                node.qualified_name.clone(),
                self.unreachable_members(tree, ty),
            );
        }

        if report.is_empty() {
            info!("Validation passed");
        } else {
            info!("Validation found {}", report);
        }
        report
    }

    fn missing_members(&self, tree: &SourceTree, common_ty: TypeId) -> Vec<String> {
        let common = self.ctx.common_tree();
        common
            .public_members(common_ty)
            .into_iter()
            .filter(|&member_id| {
                let member = common.member(member_id);
                let owner = &common.ty(member.owner).qualified_name;
                let present = tree.lookup(owner).is_some_and(|platform_owner| {
                    self.ctx
                        .comparator()
                        .class_overrides_member(tree, platform_owner, member)
                });
                if !present {
                    debug!("Missing {}", common.describe_member(member_id));
                }
                !present
            })
            .map(|member_id| common.describe_member(member_id))
            .collect()
    }

    fn unreachable_members(&self, tree: &SourceTree, ty: TypeId) -> Vec<String> {
        let common = self.ctx.common_tree();
        tree.public_constants(ty)
            .into_iter()
            .filter(|&member_id| {
                let constant = tree.member(member_id);
                let owner = &tree.ty(constant.owner).qualified_name;
                let Some(common_owner) = common.lookup(owner) else {
                    return false;
                };
                common
                    .members_of(common_owner)
                    .find(|(_, candidate)| shadows(constant, candidate))
                    .is_some_and(|(_, shadowed)| {
                        value_text(&constant.body) != value_text(&shadowed.body)
                    })
            })
            .map(|member_id| tree.describe_member(member_id))
            .collect()
    }
}

/// Same name and declared type, both non-private constants
fn shadows(constant: &MemberNode, candidate: &MemberNode) -> bool {
    is_constant(candidate)
        && !candidate.visibility.is_private()
        && candidate.name == constant.name
        && normalize(&candidate.return_type) == normalize(&constant.return_type)
}

/// Value expression compared literally, whitespace ignored
fn value_text(body: &Option<String>) -> Option<String> {
    body.as_ref()
        .map(|text| text.chars().filter(|c| !c.is_whitespace()).collect())
}
