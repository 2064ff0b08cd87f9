use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{Result, SpliceError};
use crate::features::serialization::domain::EmittedFile;

/// Write every file under `output_dir`, creating directories as needed
pub fn write_emitted(output_dir: &Path, files: &[EmittedFile]) -> Result<usize> {
    for file in files {
        let path = output_dir.join(&file.rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SpliceError::io(parent, e))?;
        }
        fs::write(&path, &file.text).map_err(|e| SpliceError::io(&path, e))?;
        debug!("Wrote {}", path.display());
    }
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_package_directories() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![EmittedFile::platform("a/b/A.java", "class A {}\n")];
        assert_eq!(write_emitted(dir.path(), &files).unwrap(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("a/b/A.java")).unwrap(),
            "class A {}\n"
        );
    }
}
