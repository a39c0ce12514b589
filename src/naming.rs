//! Derivative naming convention: `<stem>-<suffix>.<ext>`.
//!
//! All path classification goes through this module. A file is a *derivative*
//! when its stem ends in `-<suffix>` for a suffix in the active registry, or
//! in the legacy `-<width>x<height>` pattern (kept for derivatives written by
//! older size configurations). Anything else is an *original* candidate.
//!
//! Classification is registry-dependent: changing the configured suffixes
//! changes which on-disk files count as originals on the next run. Callers
//! must classify with the registry that is active at time of use.
//!
//! ## Known limitation
//!
//! Derivative lookup for an original `S` matches every file whose stem starts
//! with `S + "-"`. An unrelated original whose name happens to extend another
//! original's stem (`cat.jpg` vs `cat-5.jpg`) is matched too. This mirrors the
//! behavior the on-disk layout was built around and is kept for compatibility.

use std::path::{Path, PathBuf};

/// A path split into directory, stem, and extension.
///
/// Only the final extension counts: `archive.tar.gz` → stem `archive.tar`,
/// ext `gz`. Files without an extension get an empty `ext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    pub dir: PathBuf,
    pub stem: String,
    pub ext: String,
}

impl PathParts {
    /// Reassemble into a path, appending `.<ext>` only when one exists.
    pub fn join(&self) -> PathBuf {
        let name = if self.ext.is_empty() {
            self.stem.clone()
        } else {
            format!("{}.{}", self.stem, self.ext)
        };
        self.dir.join(name)
    }
}

/// Split a path into [`PathParts`].
pub fn split_path(path: &Path) -> PathParts {
    let dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathParts { dir, stem, ext }
}

/// Compute the derivative path for `original` under `suffix`.
///
/// Replaces the stem with `stem-<suffix>`, preserving directory and
/// extension. Pure — no filesystem access.
pub fn derivative_path(original: &Path, suffix: &str) -> PathBuf {
    let mut parts = split_path(original);
    parts.stem = format!("{}-{}", parts.stem, suffix);
    parts.join()
}

/// Default suffix for a size with the given configured dimensions.
///
/// Uses the literal configured values (`0` for an absent dimension), not
/// computed output dimensions.
pub fn default_suffix(width: Option<u32>, height: Option<u32>) -> String {
    format!("{}x{}", width.unwrap_or(0), height.unwrap_or(0))
}

/// Whether `path` is an original (not a derivative of any kind).
///
/// Returns false when the stem ends in `-<suffix>` for any suffix in
/// `suffixes`, or in the legacy `-<digits>x<digits>` pattern.
pub fn is_original(path: &Path, suffixes: &[String]) -> bool {
    let stem = split_path(path).stem;
    if has_legacy_size_suffix(&stem) {
        return false;
    }
    !suffixes.iter().any(|s| {
        stem.len() > s.len()
            && stem.ends_with(s.as_str())
            && stem.as_bytes()[stem.len() - s.len() - 1] == b'-'
    })
}

/// Whether `candidate` names a derivative of `original_stem`:
/// its stem starts with `<original_stem>-`. See the module docs for the
/// prefix-match caveat.
pub fn is_derivative_of(candidate: &Path, original_stem: &str) -> bool {
    let stem = split_path(candidate).stem;
    stem.len() > original_stem.len() + 1
        && stem.starts_with(original_stem)
        && stem.as_bytes()[original_stem.len()] == b'-'
}

/// Whether a stem ends in the legacy `-<digits>x<digits>` pattern.
fn has_legacy_size_suffix(stem: &str) -> bool {
    let Some((head, tail)) = stem.rsplit_once('-') else {
        return false;
    };
    if head.is_empty() {
        return false;
    }
    let Some((w, h)) = tail.split_once('x') else {
        return false;
    };
    !w.is_empty()
        && !h.is_empty()
        && w.bytes().all(|b| b.is_ascii_digit())
        && h.bytes().all(|b| b.is_ascii_digit())
}
