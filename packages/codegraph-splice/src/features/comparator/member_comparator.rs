use crate::features::source_tree::{MemberId, MemberNode, SourceTree, TypeId};
use crate::features::type_resolution::TypeFacts;
use crate::shared::models::MemberKind;
use crate::shared::utils::type_names::normalize;

#[derive(Debug, Clone, Default)]
pub struct MemberComparator {
    facts: TypeFacts,
}

impl MemberComparator {
    pub fn new(facts: TypeFacts) -> Self {
        Self { facts }
    }

    pub fn facts(&self) -> &TypeFacts {
        &self.facts
    }

    /// Whether `child` can stand in for `parent`
    ///
    /// Not symmetric: a child returning a narrower type overrides a parent
    /// returning a wider one, never the other way round.
    pub fn can_override(&self, child: &MemberNode, parent: &MemberNode) -> bool {
        if child.kind != parent.kind {
            return false;
        }
        if child.kind != MemberKind::Constructor && child.name != parent.name {
            return false;
        }
        if child.params.len() != parent.params.len() {
            return false;
        }
        let params_match = child
            .params
            .iter()
            .zip(&parent.params)
            .all(|(c, p)| self.facts.is_assignable(c, p));
        if !params_match {
            return false;
        }
        child.kind == MemberKind::Constructor
            || self
                .facts
                .is_assignable(&child.return_type, &parent.return_type)
    }

    /// Same kind and name with identical normalized parameter and return types
    pub fn is_exact_match(&self, a: &MemberNode, b: &MemberNode) -> bool {
        a.kind == b.kind
            && (a.kind == MemberKind::Constructor || a.name == b.name)
            && a.params.len() == b.params.len()
            && a.params.iter().zip(&b.params).all(|(x, y)| normalize(x) == normalize(y))
            && (a.kind == MemberKind::Constructor
                || normalize(&a.return_type) == normalize(&b.return_type))
    }

    /// Whether any direct member of `ty` overrides `parent`
    pub fn class_overrides_member(
        &self,
        tree: &SourceTree,
        ty: TypeId,
        parent: &MemberNode,
    ) -> bool {
        self.find_overriding(tree, ty, parent).is_some()
    }

    /// Whether any of `candidates` overrides `parent`
    pub fn any_overrides(
        &self,
        tree: &SourceTree,
        candidates: &[MemberId],
        parent: &MemberNode,
    ) -> bool {
        candidates
            .iter()
            .any(|&id| self.can_override(tree.member(id), parent))
    }

    /// Direct member of `ty` overriding `parent`, the exact match if there is one
    pub fn find_overriding(
        &self,
        tree: &SourceTree,
        ty: TypeId,
        parent: &MemberNode,
    ) -> Option<MemberId> {
        self.best_match(tree.members_of(ty), parent, |member| {
            self.can_override(member, parent)
        })
    }

    /// Direct member of `ty` that `child` overrides, the exact match if there is one
    ///
    /// An identical signature wins over declaration order: `set(int)` resolves
    /// to `set(int)` even when `set(long)` is declared first.
    pub fn find_overridden(
        &self,
        tree: &SourceTree,
        ty: TypeId,
        child: &MemberNode,
    ) -> Option<MemberId> {
        self.best_match(tree.members_of(ty), child, |member| {
            self.can_override(child, member)
        })
    }

    fn best_match<'t>(
        &self,
        candidates: impl Iterator<Item = (MemberId, &'t MemberNode)>,
        target: &MemberNode,
        compatible: impl Fn(&MemberNode) -> bool,
    ) -> Option<MemberId> {
        let mut fallback = None;
        for (id, member) in candidates {
            if self.is_exact_match(member, target) {
                return Some(id);
            }
            if fallback.is_none() && compatible(member) {
                fallback = Some(id);
            }
        }
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::{JavaSourceParser, SourceParser};

    fn tree(source: &str) -> SourceTree {
        let unit = JavaSourceParser::new().parse_unit("T.java", source).unwrap();
        SourceTree::from_units("root", vec![unit])
    }

    fn comparator(trees: &[&SourceTree]) -> MemberComparator {
        MemberComparator::new(TypeFacts::from_trees(trees))
    }

    fn member<'t>(tree: &'t SourceTree, ty: &str, index: usize) -> &'t MemberNode {
        let id = tree.ty(tree.lookup(ty).unwrap()).members[index];
        tree.member(id)
    }

    const HIERARCHY: &str = r#"
class Animal {}
class Dog extends Animal {}
class Parent {
    Animal make() { return null; }
    void feed(Animal a) {}
    Parent(int size) {}
    int count;
}
class Child {
    Dog make() { return null; }
    void feed(Dog d) {}
    Child(int size) {}
    int count;
    void extra() {}
}
"#;

    #[test]
    fn test_covariant_return_is_one_way() {
        let tree = tree(HIERARCHY);
        let cmp = comparator(&[&tree]);
        let parent = member(&tree, "Parent", 0);
        let child = member(&tree, "Child", 0);
        assert!(cmp.can_override(child, parent));
        assert!(!cmp.can_override(parent, child));
    }

    #[test]
    fn test_parameters_follow_child_to_parent() {
        let tree = tree(HIERARCHY);
        let cmp = comparator(&[&tree]);
        let parent = member(&tree, "Parent", 1);
        let child = member(&tree, "Child", 1);
        assert!(cmp.can_override(child, parent));
        assert!(!cmp.can_override(parent, child));
    }

    #[test]
    fn test_constructors_compare_by_signature_only() {
        let tree = tree(HIERARCHY);
        let cmp = comparator(&[&tree]);
        assert!(cmp.can_override(member(&tree, "Child", 2), member(&tree, "Parent", 2)));
    }

    #[test]
    fn test_kinds_and_names_must_match() {
        let tree = tree(HIERARCHY);
        let cmp = comparator(&[&tree]);
        let field = member(&tree, "Parent", 3);
        assert!(cmp.can_override(member(&tree, "Child", 3), field));
        assert!(!cmp.can_override(member(&tree, "Child", 4), member(&tree, "Parent", 1)));
        assert!(!cmp.can_override(member(&tree, "Child", 0), field));
    }

    #[test]
    fn test_unresolved_types_never_match() {
        let tree = tree("class A { Foo a() { return null; } }\nclass B { Bar a() { return null; } }\n");
        let cmp = comparator(&[&tree]);
        assert!(!cmp.can_override(member(&tree, "B", 0), member(&tree, "A", 0)));
    }

    #[test]
    fn test_find_overridden_and_class_overrides_member() {
        let tree = tree(HIERARCHY);
        let cmp = comparator(&[&tree]);
        let parent_ty = tree.lookup("Parent").unwrap();
        let child_ty = tree.lookup("Child").unwrap();

        let extra = member(&tree, "Child", 4);
        assert!(cmp.find_overridden(&tree, parent_ty, extra).is_none());

        let make = member(&tree, "Child", 0);
        let found = cmp.find_overridden(&tree, parent_ty, make).unwrap();
        assert_eq!(tree.member(found).name, "make");

        assert!(cmp.class_overrides_member(&tree, child_ty, member(&tree, "Parent", 1)));
    }

    #[test]
    fn test_exact_overload_wins_over_declaration_order() {
        let tree = tree(
            "class Common { void set(long v) {} void set(int v) {} }\nclass Platform { void set(int v) {} }\n",
        );
        let cmp = comparator(&[&tree]);
        let common_ty = tree.lookup("Common").unwrap();
        let platform_ty = tree.lookup("Platform").unwrap();

        let child = member(&tree, "Platform", 0);
        let found = cmp.find_overridden(&tree, common_ty, child).unwrap();
        assert_eq!(found, tree.ty(common_ty).members[1]);

        let overriding = cmp
            .find_overriding(&tree, platform_ty, member(&tree, "Common", 1))
            .unwrap();
        assert_eq!(overriding, tree.ty(platform_ty).members[0]);
    }

    #[test]
    fn test_falls_back_to_assignable_without_exact_match() {
        let tree = tree("class Common { void set(long v) {} }\nclass Platform { void set(int v) {} }\n");
        let cmp = comparator(&[&tree]);
        let common_ty = tree.lookup("Common").unwrap();
        let child = member(&tree, "Platform", 0);
        assert!(!cmp.is_exact_match(child, member(&tree, "Common", 0)));
        assert_eq!(
            cmp.find_overridden(&tree, common_ty, child),
            Some(tree.ty(common_ty).members[0])
        );
    }

    #[test]
    fn test_any_overrides_only_sees_candidates() {
        let tree = tree("class Common { void set(long v) {} }\nclass Platform { void set(int v) {} }\n");
        let cmp = comparator(&[&tree]);
        let platform_ty = tree.lookup("Platform").unwrap();
        let parent = member(&tree, "Common", 0);
        assert!(cmp.any_overrides(&tree, &tree.ty(platform_ty).members, parent));
        assert!(!cmp.any_overrides(&tree, &[], parent));
    }
}
