//! Temp-dir workspaces and in-memory trees

use std::fs;
use std::path::{Path, PathBuf};

use codegraph_splice::{
    ColorChoice, CommonTreeCache, JavaSourceParser, PipelineOutcome, SourceParser, SourceTree,
    SpliceConfig, SpliceOutput, SplicePipeline,
};
use tempfile::TempDir;

pub const TEST_TAG: &str = "splice";

/// `common/`, `platform/` and `out/` under one temp dir
pub struct SpliceWorkspace {
    dir: TempDir,
}

impl SpliceWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("common")).unwrap();
        fs::create_dir_all(dir.path().join("platform")).unwrap();
        Self { dir }
    }

    pub fn common(self, rel_path: &str, source: impl AsRef<str>) -> Self {
        write(&self.common_root().join(rel_path), source.as_ref());
        self
    }

    pub fn platform(self, rel_path: &str, source: impl AsRef<str>) -> Self {
        write(&self.platform_root().join(rel_path), source.as_ref());
        self
    }

    pub fn common_root(&self) -> PathBuf {
        self.dir.path().join("common")
    }

    pub fn platform_root(&self) -> PathBuf {
        self.dir.path().join("platform")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn config(&self) -> SpliceConfig {
        SpliceConfig::new(self.common_root(), self.platform_root(), self.output_dir())
            .provenance_tag(TEST_TAG)
            .color(ColorChoice::Never)
    }

    /// Full build with a fresh common cache
    pub fn run(&self) -> codegraph_splice::Result<PipelineOutcome> {
        let cache = CommonTreeCache::new();
        SplicePipeline::new(self.config()).with_cache(&cache).run()
    }

    pub fn check(&self) -> codegraph_splice::Result<PipelineOutcome> {
        let cache = CommonTreeCache::new();
        SplicePipeline::new(self.config()).with_cache(&cache).check()
    }

    pub fn splice(&self) -> codegraph_splice::Result<Option<SpliceOutput>> {
        let cache = CommonTreeCache::new();
        SplicePipeline::new(self.config()).with_cache(&cache).splice()
    }

    pub fn read_output(&self, rel_path: &str) -> String {
        fs::read_to_string(self.output_dir().join(rel_path)).unwrap()
    }
}

fn write(path: &Path, source: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, source).unwrap();
}

/// Parse in-memory sources into a tree
pub fn tree_from<S: AsRef<str>>(root: &str, files: &[(S, S)]) -> SourceTree {
    let parser = JavaSourceParser::new();
    let units = files
        .iter()
        .map(|(path, source)| parser.parse_unit(path.as_ref(), source.as_ref()).unwrap())
        .collect();
    SourceTree::from_units(root, units)
}
