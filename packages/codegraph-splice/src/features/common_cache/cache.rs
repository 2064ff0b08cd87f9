use std::path::Path;
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use tracing::warn;

use super::index::CommonIndex;
use crate::errors::Result;
use crate::features::parsing::{JavaSourceParser, SourceParser};

static GLOBAL: Lazy<CommonTreeCache> = Lazy::new(CommonTreeCache::new);

/// Once-initialised holder of the common index
///
/// Only the first successful `init` parses anything; concurrent callers block
/// until it finishes and then share the same index. A failed init leaves the
/// cache empty so a later call can retry.
#[derive(Debug, Default)]
pub struct CommonTreeCache {
    cell: OnceCell<Arc<CommonIndex>>,
}

impl CommonTreeCache {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Process-wide cache
    pub fn global() -> &'static CommonTreeCache {
        &GLOBAL
    }

    pub fn init(&self, root: &Path, extension: &str) -> Result<Arc<CommonIndex>> {
        self.init_with(root, extension, &JavaSourceParser::new())
    }

    pub fn init_with<P: SourceParser>(
        &self,
        root: &Path,
        extension: &str,
        parser: &P,
    ) -> Result<Arc<CommonIndex>> {
        let index = self
            .cell
            .get_or_try_init(|| CommonIndex::build(root, extension, parser).map(Arc::new))?;
        if index.root() != root {
            warn!(
                "Common tree already initialised from {}, ignoring {}",
                index.root().display(),
                root.display()
            );
        }
        Ok(Arc::clone(index))
    }

    pub fn get(&self) -> Option<Arc<CommonIndex>> {
        self.cell.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;

    #[test]
    fn test_init_is_idempotent_across_threads() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A.java"), "class A { void a() {} }\n").unwrap();

        let cache = Arc::new(CommonTreeCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let root = dir.path().to_path_buf();
                thread::spawn(move || cache.init(&root, "java").unwrap())
            })
            .collect();
        let indexes: Vec<Arc<CommonIndex>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        for index in &indexes[1..] {
            assert!(Arc::ptr_eq(index, &indexes[0]));
        }
        assert!(cache.is_initialized());
    }

    #[test]
    fn test_failed_init_leaves_cache_empty() {
        let cache = CommonTreeCache::new();
        assert!(cache.init(Path::new("/no/such/root"), "java").is_err());
        assert!(!cache.is_initialized());
    }
}
