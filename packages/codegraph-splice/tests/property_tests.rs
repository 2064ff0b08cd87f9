//! Property-based tests
//!
//! - Asymmetry: two members with different signatures never override each other
//! - Idempotence: inheriting missing members twice adds nothing the second time
//! - Overloads: every common overload the platform does not already cover is copied

mod common;

use std::sync::Arc;

use codegraph_splice::{
    features::markers::inherit_missing_members, BuildContext, CommonIndex, MemberComparator,
    MemberId, MemberNode, ProcessStats, SourceTree, TypeFacts,
};
use common::*;
use proptest::prelude::*;

fn type_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SIMPLE_TYPES)
}

fn signature_strategy() -> impl Strategy<Value = (Vec<&'static str>, &'static str)> {
    (prop::collection::vec(type_strategy(), 0..3), type_strategy())
}

/// Two classes holding one method `m` each, plus the Base/Derived hierarchy
fn method_pair_tree(
    first: &(Vec<&str>, &str),
    second: &(Vec<&str>, &str),
) -> (SourceTree, MemberId, MemberId) {
    let mut files = hierarchy_sources();
    files.push((
        "First.java".to_string(),
        java_class("", "public class First", &[java_method("m", &first.0, first.1).as_str()]),
    ));
    files.push((
        "Second.java".to_string(),
        java_class("", "public class Second", &[java_method("m", &second.0, second.1).as_str()]),
    ));
    let tree = tree_from("pairs", &files);
    let first = tree.ty(tree.lookup("First").unwrap()).members[0];
    let second = tree.ty(tree.lookup("Second").unwrap()).members[0];
    (tree, first, second)
}

fn member_set(tree: &SourceTree, qualified_name: &str) -> Vec<String> {
    let ty = tree.lookup(qualified_name).unwrap();
    let mut members: Vec<String> = tree
        .members_of(ty)
        .map(|(id, _)| tree.describe_member(id))
        .collect();
    members.sort();
    members
}

const OVERLOAD_NAMES: &[&str] = &["m", "n"];

type Triple = (String, Vec<String>, String);

fn triple(member: &MemberNode) -> Triple {
    (member.name.clone(), member.params.clone(), member.return_type.clone())
}

fn triples(tree: &SourceTree, qualified_name: &str) -> Vec<Triple> {
    let ty = tree.lookup(qualified_name).unwrap();
    tree.members_of(ty).map(|(_, member)| triple(member)).collect()
}

/// Up to six methods over two shared names, distinct by parameter list
fn overload_set_strategy() -> impl Strategy<Value = Vec<(&'static str, Vec<&'static str>, &'static str)>> {
    prop::collection::vec(
        (prop::sample::select(OVERLOAD_NAMES), signature_strategy()),
        1..6,
    )
    .prop_map(|candidates| {
        let mut seen = Vec::new();
        let mut methods = Vec::new();
        for (name, (params, ret)) in candidates {
            if !seen.contains(&(name, params.clone())) {
                seen.push((name, params.clone()));
                methods.push((name, params, ret));
            }
        }
        methods
    })
}

/// Common `Foo` holding `common_methods`, platform `Foo` holding `platform_methods`
fn overload_trees(common_methods: &[String], platform_methods: &[String]) -> (Arc<CommonIndex>, SourceTree) {
    let mut common_files = hierarchy_sources();
    let body: Vec<&str> = common_methods.iter().map(String::as_str).collect();
    common_files.push(("Foo.java".to_string(), java_class("", "public class Foo", &body)));
    let common = Arc::new(CommonIndex::from_tree(tree_from("common", &common_files)));

    let body: Vec<&str> = platform_methods.iter().map(String::as_str).collect();
    let platform = tree_from(
        "platform",
        &[("Foo.java".to_string(), java_class("", "public class Foo", &body))],
    );
    (common, platform)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_override_is_asymmetric(first in signature_strategy(), second in signature_strategy()) {
        let (tree, a, b) = method_pair_tree(&first, &second);
        let comparator = MemberComparator::new(TypeFacts::from_trees(&[&tree]));
        let (a, b) = (tree.member(a), tree.member(b));

        if comparator.can_override(a, b) && comparator.can_override(b, a) {
            prop_assert_eq!(a.signature(), b.signature());
            prop_assert_eq!(&a.return_type, &b.return_type);
        }
    }

    #[test]
    fn prop_member_overrides_itself(signature in signature_strategy()) {
        let (tree, a, _) = method_pair_tree(&signature, &signature);
        let comparator = MemberComparator::new(TypeFacts::from_trees(&[&tree]));
        prop_assert!(comparator.can_override(tree.member(a), tree.member(a)));
    }

    #[test]
    fn prop_inherit_missing_members_is_idempotent(
        common_members in overload_set_strategy(),
        present in prop::collection::vec(any::<bool>(), 6),
    ) {
        let methods: Vec<String> = common_members
            .iter()
            .map(|(name, params, ret)| java_method(name, params, ret))
            .collect();
        let platform_methods: Vec<String> = methods
            .iter()
            .zip(&present)
            .filter(|(_, keep)| **keep)
            .map(|(method, _)| method.clone())
            .collect();

        let (common, mut platform) = overload_trees(&methods, &platform_methods);
        let ctx = BuildContext::new(Arc::clone(&common), &platform);
        let foo = platform.lookup("Foo").unwrap();
        let common_foo = ctx.counterpart("Foo").unwrap();

        let declared = platform.ty(foo).members.clone();
        let mut expected = triples(&platform, "Foo");
        for (_, member) in ctx.common_tree().members_of(common_foo) {
            if !ctx.comparator().any_overrides(&platform, &declared, member) {
                expected.push(triple(member));
            }
        }

        let mut stats = ProcessStats::default();
        inherit_missing_members(&ctx, &mut platform, foo, common_foo, &mut stats);
        let once = member_set(&platform, "Foo");
        let cloned_once = stats.members_cloned;
        prop_assert_eq!(triples(&platform, "Foo"), expected);

        inherit_missing_members(&ctx, &mut platform, foo, common_foo, &mut stats);
        prop_assert_eq!(member_set(&platform, "Foo"), once);
        prop_assert_eq!(stats.members_cloned, cloned_once);

        for (_, member) in ctx.common_tree().members_of(common_foo) {
            prop_assert!(ctx.comparator().class_overrides_member(&platform, foo, member));
        }
    }

    #[test]
    fn prop_empty_platform_inherits_every_overload(common_members in overload_set_strategy()) {
        let methods: Vec<String> = common_members
            .iter()
            .map(|(name, params, ret)| java_method(name, params, ret))
            .collect();

        let (common, mut platform) = overload_trees(&methods, &[]);
        let ctx = BuildContext::new(Arc::clone(&common), &platform);
        let foo = platform.lookup("Foo").unwrap();
        let common_foo = ctx.counterpart("Foo").unwrap();

        let mut stats = ProcessStats::default();
        inherit_missing_members(&ctx, &mut platform, foo, common_foo, &mut stats);
        prop_assert_eq!(stats.members_cloned, common_members.len());
        prop_assert_eq!(triples(&platform, "Foo"), triples(ctx.common_tree(), "Foo"));
    }
}
