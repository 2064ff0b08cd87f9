//! SourceTree arena and queries

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::warn;

use super::node::{FileId, MemberId, MemberNode, SourceFile, TypeId, TypeNode};
use crate::shared::models::MemberKind;
use crate::shared::utils::type_names::{normalize, TypeShape};

/// Packages → types → members of one source root
///
/// Nodes live in flat arenas; a type is found only by its exact qualified
/// name (`pkg.Outer.Inner`).
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    root: PathBuf,
    files: Vec<SourceFile>,
    types: Vec<TypeNode>,
    members: Vec<MemberNode>,
    by_name: FxHashMap<String, TypeId>,
    by_path: FxHashMap<String, FileId>,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// No source files at all
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0]
    }

    pub fn file_mut(&mut self, id: FileId) -> &mut SourceFile {
        &mut self.files[id.0]
    }

    pub fn file_ids(&self) -> impl Iterator<Item = FileId> {
        (0..self.files.len()).map(FileId)
    }

    pub fn file_by_path(&self, rel_path: &str) -> Option<FileId> {
        self.by_path.get(rel_path).copied()
    }

    pub fn ty(&self, id: TypeId) -> &TypeNode {
        &self.types[id.0]
    }

    pub fn ty_mut(&mut self, id: TypeId) -> &mut TypeNode {
        &mut self.types[id.0]
    }

    pub fn member(&self, id: MemberId) -> &MemberNode {
        &self.members[id.0]
    }

    pub fn member_mut(&mut self, id: MemberId) -> &mut MemberNode {
        &mut self.members[id.0]
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.types.len()).map(TypeId)
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.by_name.contains_key(qualified_name)
    }

    pub fn add_file(&mut self, file: SourceFile) -> FileId {
        let id = FileId(self.files.len());
        self.by_path.insert(file.rel_path.clone(), id);
        self.files.push(file);
        id
    }

    /// Add a type under `parent`, or as a top-level type of its file
    pub fn add_type(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.types.len());
        match node.parent {
            Some(parent) => self.types[parent.0].nested.push(id),
            None => self.files[node.file.0].types.push(id),
        }
        if self.by_name.contains_key(&node.qualified_name) {
            warn!(
                "Duplicate type {} in {}, keeping the first declaration",
                node.qualified_name,
                self.files[node.file.0].rel_path
            );
        } else {
            self.by_name.insert(node.qualified_name.clone(), id);
        }
        self.types.push(node);
        id
    }

    pub fn add_member(&mut self, node: MemberNode) -> MemberId {
        let id = MemberId(self.members.len());
        self.types[node.owner.0].members.push(id);
        self.members.push(node);
        id
    }

    pub fn members_of(&self, ty: TypeId) -> impl Iterator<Item = (MemberId, &MemberNode)> {
        self.types[ty.0]
            .members
            .iter()
            .map(move |&id| (id, &self.members[id.0]))
    }

    pub fn nested_named(&self, ty: TypeId, name: &str) -> Option<TypeId> {
        self.types[ty.0]
            .nested
            .iter()
            .copied()
            .find(|&nested| self.types[nested.0].name == name)
    }

    /// Outermost enclosing type (the type itself when top-level)
    pub fn top_level_of(&self, mut ty: TypeId) -> TypeId {
        while let Some(parent) = self.types[ty.0].parent {
            ty = parent;
        }
        ty
    }

    /// Simple names from the top-level type down: `Outer.Inner`
    pub fn nesting_path(&self, ty: TypeId) -> String {
        let mut names = vec![self.types[ty.0].name.as_str()];
        let mut current = ty;
        while let Some(parent) = self.types[current.0].parent {
            names.push(self.types[parent.0].name.as_str());
            current = parent;
        }
        names.reverse();
        names.join(".")
    }

    /// Top-level types, packages in lexical order, files in path order
    pub fn top_level_types(&self) -> Vec<TypeId> {
        let mut by_package: BTreeMap<&str, Vec<(&str, TypeId)>> = BTreeMap::new();
        for file in &self.files {
            for &ty in &file.types {
                by_package
                    .entry(file.package.as_str())
                    .or_default()
                    .push((file.rel_path.as_str(), ty));
            }
        }
        by_package
            .into_values()
            .flat_map(|mut types| {
                types.sort_by(|a, b| a.0.cmp(b.0).then(a.1.cmp(&b.1)));
                types.into_iter().map(|(_, ty)| ty)
            })
            .collect()
    }

    /// Every type: per package, the top-level types followed by their nested types in pre-order
    pub fn all_types(&self) -> Vec<TypeId> {
        let top_level = self.top_level_types();
        let mut out = Vec::with_capacity(self.types.len());

        let mut start = 0;
        while start < top_level.len() {
            let package = &self.types[top_level[start].0].package;
            let end = top_level[start..]
                .iter()
                .position(|ty| &self.types[ty.0].package != package)
                .map_or(top_level.len(), |offset| start + offset);

            out.extend_from_slice(&top_level[start..end]);
            for &ty in &top_level[start..end] {
                self.push_nested_preorder(ty, &mut out);
            }
            start = end;
        }
        out
    }

    fn push_nested_preorder(&self, ty: TypeId, out: &mut Vec<TypeId>) {
        for &nested in &self.types[ty.0].nested {
            out.push(nested);
            self.push_nested_preorder(nested, out);
        }
    }

    /// Non-private, non-constant members of `ty` and its non-private nested types
    pub fn public_members(&self, ty: TypeId) -> Vec<MemberId> {
        let mut out = Vec::new();
        self.collect_members(ty, &mut out, &|member| {
            !member.visibility.is_private() && !is_constant(member)
        });
        out
    }

    /// Non-private constant fields of `ty` and its non-private nested types
    pub fn public_constants(&self, ty: TypeId) -> Vec<MemberId> {
        let mut out = Vec::new();
        self.collect_members(ty, &mut out, &|member| {
            !member.visibility.is_private() && is_constant(member)
        });
        out
    }

    fn collect_members(
        &self,
        ty: TypeId,
        out: &mut Vec<MemberId>,
        keep: &dyn Fn(&MemberNode) -> bool,
    ) {
        let node = &self.types[ty.0];
        out.extend(
            node.members
                .iter()
                .copied()
                .filter(|id| keep(&self.members[id.0])),
        );
        for &nested in &node.nested {
            if !self.types[nested.0].visibility.is_private() {
                self.collect_members(nested, out, keep);
            }
        }
    }

    /// `Outer.Inner#name(p1,p2) -> ret`, `Type#NAME -> type`, `Type#<init>(p1)`
    pub fn describe_member(&self, id: MemberId) -> String {
        let member = &self.members[id.0];
        let owner = self.nesting_path(member.owner);
        let params = || {
            member
                .params
                .iter()
                .map(|p| normalize(p))
                .collect::<Vec<_>>()
                .join(",")
        };
        match member.kind {
            MemberKind::Method => format!(
                "{}#{}({}) -> {}",
                owner,
                member.name,
                params(),
                normalize(&member.return_type)
            ),
            MemberKind::Field => format!(
                "{}#{} -> {}",
                owner,
                member.name,
                normalize(&member.return_type)
            ),
            MemberKind::Constructor => format!("{}#{}({})", owner, member.name, params()),
        }
    }
}

/// Compile-time constant candidate: a primitive- or `String`-typed field
pub fn is_constant(member: &MemberNode) -> bool {
    if member.kind != MemberKind::Field {
        return false;
    }
    let shape = TypeShape::parse(&member.return_type);
    shape.is_primitive() || shape.is_string()
}
