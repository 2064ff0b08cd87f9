//! Parse every source file below a root directory

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::{Result, SpliceError};
use crate::features::parsing::domain::ParsedUnit;
use crate::features::parsing::ports::SourceParser;

/// Source files below `root` with the given extension, sorted by path
pub fn collect_sources(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let io = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            SpliceError::io(path, io)
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(extension)
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// `/`-separated path of `path` relative to `root`
pub(crate) fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read and parse files in parallel; output order follows `files`
pub fn parse_sources<P: SourceParser>(
    root: &Path,
    files: &[PathBuf],
    parser: &P,
) -> Result<Vec<ParsedUnit>> {
    let units = files
        .par_iter()
        .map(|path| {
            let source =
                std::fs::read_to_string(path).map_err(|e| SpliceError::io(path.clone(), e))?;
            let rel_path = relative_path(root, path);
            let unit = parser.parse_unit(&rel_path, &source)?;
            for issue in &unit.issues {
                warn!(
                    "{}:{}: syntax problem ({}), continuing with recovered tree",
                    rel_path, issue.span.start_line, issue.message
                );
            }
            Ok(unit)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("parsed {} {} file(s) under {}", units.len(), parser.language_name(), root.display());
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::JavaSourceParser;

    #[test]
    fn test_collect_and_parse_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("com/example");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(pkg.join("B.java"), "package com.example; class B {}").unwrap();
        std::fs::write(pkg.join("A.java"), "package com.example; class A {}").unwrap();
        std::fs::write(pkg.join("notes.txt"), "ignored").unwrap();

        let files = collect_sources(dir.path(), "java").unwrap();
        assert_eq!(files.len(), 2);

        let units = parse_sources(dir.path(), &files, &JavaSourceParser::new()).unwrap();
        let paths: Vec<_> = units.iter().map(|u| u.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["com/example/A.java", "com/example/B.java"]);
        assert_eq!(units[0].types[0].name, "A");
    }
}
