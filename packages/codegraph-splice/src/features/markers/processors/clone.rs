//! Copying common declarations into the platform tree

use tracing::debug;

use crate::features::source_tree::{
    MemberId, MemberNode, MemberOrigin, SourceTree, TypeId, TypeNode, TypeOrigin,
};
use crate::shared::models::{Marker, MarkerKind, MarkerSet, Span, Stage};

/// Clone a common member into `owner`
///
/// The clone carries no markers except its provenance.
pub(crate) fn clone_member(
    common: &SourceTree,
    source: MemberId,
    tree: &mut SourceTree,
    owner: TypeId,
    stage: Stage,
) -> MemberId {
    let original = common.member(source);
    let node = MemberNode {
        owner,
        kind: original.kind,
        name: original.name.clone(),
        params: original.params.clone(),
        return_type: original.return_type.clone(),
        visibility: original.visibility,
        modifiers: original.modifiers,
        markers: vec![Marker::provenance(stage)],
        body: original.body.clone(),
        body_replaced: false,
        indent: original.indent.clone(),
        span: Span::zero(),
        origin: MemberOrigin::Cloned {
            stage,
            from: common.describe_member(source),
            text: common.render_member(source),
        },
    };
    debug!(
        "Cloned {} into {}",
        common.describe_member(source),
        tree.ty(owner).qualified_name
    );
    tree.add_member(node)
}

/// Clone a common nested type, with its members and nested types, under `parent`
///
/// Members the common tree marks `PlatformMustOverwrite` are left out, as they
/// are when inheriting into an existing type.
pub(crate) fn clone_nested_type(
    common: &SourceTree,
    source: TypeId,
    tree: &mut SourceTree,
    parent: TypeId,
    stage: Stage,
    cloned_members: &mut usize,
) -> TypeId {
    let original = common.ty(source);
    let parent_node = tree.ty(parent);
    let node = TypeNode {
        name: original.name.clone(),
        qualified_name: format!("{}.{}", parent_node.qualified_name, original.name),
        package: parent_node.package.clone(),
        kind: original.kind,
        visibility: original.visibility,
        modifiers: original.modifiers,
        markers: vec![Marker::provenance(stage)],
        supertypes: original.supertypes.clone(),
        file: parent_node.file,
        parent: Some(parent),
        members: Vec::new(),
        nested: Vec::new(),
        indent: original.indent.clone(),
        span: Span::zero(),
        origin: TypeOrigin::Cloned {
            stage,
            from: original.qualified_name.clone(),
            header: common.type_header(source),
            extras: common.type_extras(source),
        },
    };
    let id = tree.add_type(node);
    debug!(
        "Cloned type {} into {}",
        original.qualified_name,
        tree.ty(parent).qualified_name
    );

    for (member_id, member) in common.members_of(source) {
        if member.has_marker(&MarkerKind::PlatformMustOverwrite) {
            continue;
        }
        clone_member(common, member_id, tree, id, stage);
        *cloned_members += 1;
    }
    for &nested in &original.nested {
        clone_nested_type(common, nested, tree, id, stage, cloned_members);
    }
    id
}

/// Make the imports of `source`'s file available to the file holding `target`
pub(crate) fn adopt_imports(
    common: &SourceTree,
    source: TypeId,
    tree: &mut SourceTree,
    target: TypeId,
) {
    let from = common.file(common.ty(source).file);
    let file = tree.ty(target).file;
    for import in &from.imports {
        if tree.file_mut(file).adopt_import(import) {
            debug!("Adopted `{}` into {}", import.render(), tree.file(file).rel_path);
        }
    }
}
