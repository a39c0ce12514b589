//! Directory scanning: enumerate candidate files under the working directory.
//!
//! Recursive mode walks the full subtree with `walkdir`; flat mode yields
//! only direct children. Both skip directories and yield files in filesystem
//! enumeration order — callers must not depend on ordering for correctness.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read directory {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("walk error under {0}: {1}")]
    Walk(PathBuf, walkdir::Error),
}

/// Enumerate every non-directory entry under `root`.
pub fn scan(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    if recursive {
        scan_recursive(root)
    } else {
        scan_flat(root)
    }
}

fn scan_recursive(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| ScanError::Walk(root.to_path_buf(), e))?;
        if !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn scan_flat(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(root).map_err(|e| ScanError::Io(root.to_path_buf(), e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::Io(root.to_path_buf(), e))?;
        let path = entry.path();
        if !path.is_dir() {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), "x").unwrap();
        fs::write(tmp.path().join("b.png"), "x").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/c.jpg"), "x").unwrap();
        fs::create_dir(tmp.path().join("sub/deeper")).unwrap();
        fs::write(tmp.path().join("sub/deeper/d.gif"), "x").unwrap();
        tmp
    }

    #[test]
    fn recursive_scan_finds_full_subtree() {
        let tmp = setup_tree();
        let mut files = scan(tmp.path(), true).unwrap();
        files.sort();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "sub/c.jpg", "sub/deeper/d.gif"]);
    }

    #[test]
    fn flat_scan_yields_direct_children_only() {
        let tmp = setup_tree();
        let mut files = scan(tmp.path(), false).unwrap();
        files.sort();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn scan_excludes_directories() {
        let tmp = setup_tree();
        for recursive in [true, false] {
            let files = scan(tmp.path(), recursive).unwrap();
            assert!(files.iter().all(|p| !p.is_dir()));
        }
    }

    #[test]
    fn missing_directory_is_error() {
        let missing = Path::new("/nonexistent/thumbsync-test");
        assert!(scan(missing, true).is_err());
        assert!(scan(missing, false).is_err());
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(scan(tmp.path(), true).unwrap().is_empty());
    }
}
