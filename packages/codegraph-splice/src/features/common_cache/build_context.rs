use std::sync::Arc;

use super::index::CommonIndex;
use crate::features::comparator::MemberComparator;
use crate::features::source_tree::{SourceTree, TypeId};
use crate::features::type_resolution::TypeFacts;

/// Everything one platform build reads but never mutates
#[derive(Debug, Clone)]
pub struct BuildContext {
    common: Arc<CommonIndex>,
    comparator: Arc<MemberComparator>,
}

impl BuildContext {
    /// Context for building `platform` against `common`
    ///
    /// Type facts cover the declarations of both trees.
    pub fn new(common: Arc<CommonIndex>, platform: &SourceTree) -> Self {
        let facts = TypeFacts::from_trees(&[common.tree(), platform]);
        Self {
            common,
            comparator: Arc::new(MemberComparator::new(facts)),
        }
    }

    pub fn common(&self) -> &CommonIndex {
        &self.common
    }

    pub fn common_tree(&self) -> &SourceTree {
        self.common.tree()
    }

    pub fn comparator(&self) -> &MemberComparator {
        &self.comparator
    }

    /// Common type with the same qualified name
    pub fn counterpart(&self, qualified_name: &str) -> Option<TypeId> {
        self.common.lookup(qualified_name)
    }
}
