use std::path::Path;

use tracing::{debug, info};

use crate::errors::{Result, SpliceError};
use crate::features::parsing::SourceParser;
use crate::features::source_tree::{parse_tree, SourceTree, TypeId};
use crate::shared::models::{MarkerKind, MarkerSet};

/// Indexed, immutable common tree
#[derive(Debug)]
pub struct CommonIndex {
    tree: SourceTree,
    overwrite_targets: Vec<TypeId>,
}

impl CommonIndex {
    /// Parse and index the common root
    pub fn build<P: SourceParser>(root: &Path, extension: &str, parser: &P) -> Result<Self> {
        if !root.is_dir() {
            return Err(SpliceError::MissingCommonRoot {
                path: root.to_path_buf(),
            });
        }
        let tree = parse_tree(root, extension, parser)?;
        let index = Self::from_tree(tree);
        info!(
            "Common tree indexed: {} types, {} required overwrite targets",
            index.tree.type_count(),
            index.overwrite_targets.len()
        );
        Ok(index)
    }

    /// Index an already parsed tree
    ///
    /// `OverwriteTarget` markers are stripped here; only `required` ones are
    /// remembered as targets.
    pub fn from_tree(mut tree: SourceTree) -> Self {
        let mut overwrite_targets = Vec::new();
        for id in tree.all_types() {
            let Some(required) = tree.ty(id).markers().iter().find_map(|m| match m.kind {
                MarkerKind::OverwriteTarget { required } => Some(required),
                _ => None,
            }) else {
                continue;
            };
            tree.ty_mut(id)
                .strip_marker(&MarkerKind::OverwriteTarget { required });
            if required {
                debug!("Overwrite target: {}", tree.ty(id).qualified_name);
                overwrite_targets.push(id);
            }
        }
        Self {
            tree,
            overwrite_targets,
        }
    }

    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    pub fn root(&self) -> &Path {
        self.tree.root()
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.tree.lookup(qualified_name)
    }

    /// Common types every platform must replace
    pub fn overwrite_targets(&self) -> &[TypeId] {
        &self.overwrite_targets
    }
}
