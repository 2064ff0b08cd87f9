//! Assignability facts
//!
//! Answers "is a value of type `from` assignable to `to`" from type text alone,
//! backed by the supertypes both trees declare plus a built-in table. No
//! imports, overloads or generic bounds are resolved: anything the facts cannot
//! prove is not assignable.

use rustc_hash::{FxHashMap, FxHashSet};

use super::builtin_types::{primitive_widens_to, BUILTIN_SUPERTYPES};
use crate::features::source_tree::SourceTree;
use crate::shared::utils::type_names::{normalize, simple_name, TypeShape};

const OBJECT: &str = "Object";

/// Declared type hierarchy keyed by simple name
#[derive(Debug, Clone, Default)]
pub struct TypeFacts {
    supertypes: FxHashMap<String, Vec<String>>,
}

impl TypeFacts {
    /// Facts with the built-in table only
    pub fn new() -> Self {
        Self::default()
    }

    /// Facts from every type declared in `trees`
    pub fn from_trees(trees: &[&SourceTree]) -> Self {
        let mut facts = Self::new();
        for tree in trees {
            facts.record_tree(tree);
        }
        facts
    }

    pub fn record_tree(&mut self, tree: &SourceTree) {
        for id in tree.type_ids() {
            let ty = tree.ty(id);
            self.record(&ty.name, &ty.supertypes);
        }
    }

    /// Record direct supertypes of a type (names as written)
    pub fn record(&mut self, name: &str, supertypes: &[String]) {
        let entry = self.supertypes.entry(name.to_string()).or_default();
        for supertype in supertypes {
            let simple = TypeShape::parse(supertype).simple_base().to_string();
            if !entry.contains(&simple) {
                entry.push(simple);
            }
        }
    }

    pub fn is_assignable(&self, from: &str, to: &str) -> bool {
        let (from, to) = (normalize(from), normalize(to));
        if from.is_empty() || to.is_empty() {
            return false;
        }
        if from == to {
            return true;
        }
        self.shape_assignable(&TypeShape::parse(&from), &TypeShape::parse(&to))
    }

    fn shape_assignable(&self, from: &TypeShape, to: &TypeShape) -> bool {
        if from.is_void() || to.is_void() {
            return from == to;
        }
        if from.is_primitive() || to.is_primitive() {
            return from.is_primitive()
                && to.is_primitive()
                && (from.base == to.base || primitive_widens_to(&from.base, &to.base));
        }

        // Every reference type, arrays included, is an Object
        if to.dims == 0 && to.simple_base() == OBJECT && to.args.is_none() {
            return true;
        }

        if from.dims > 0 || to.dims > 0 {
            return match (from.component(), to.component()) {
                (Some(from_elem), Some(to_elem)) => {
                    if from_elem.is_primitive() || to_elem.is_primitive() {
                        from_elem == to_elem
                    } else {
                        self.shape_assignable(&from_elem, &to_elem)
                    }
                }
                _ => false,
            };
        }

        if let (Some(from_args), Some(to_args)) = (&from.args, &to.args) {
            if from_args != to_args {
                return false;
            }
        }
        self.is_subtype(from.simple_base(), to.simple_base())
    }

    /// `from` equals `to` or reaches it through declared supertypes
    pub fn is_subtype(&self, from: &str, to: &str) -> bool {
        let (from, to) = (simple_name(from), simple_name(to));
        if from == to {
            return true;
        }

        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut queue = vec![from];
        while let Some(current) = queue.pop() {
            if !visited.insert(current) {
                continue;
            }
            for supertype in self.direct_supertypes(current) {
                if supertype == to {
                    return true;
                }
                queue.push(supertype);
            }
        }
        false
    }

    fn direct_supertypes<'a>(&'a self, name: &str) -> Vec<&'a str> {
        let mut out: Vec<&'a str> = self
            .supertypes
            .get(name)
            .map(|s| s.iter().map(String::as_str).collect())
            .unwrap_or_default();
        if let Some(builtin) = BUILTIN_SUPERTYPES.get(name) {
            out.extend(builtin.iter().copied());
        }
        out
    }
}
