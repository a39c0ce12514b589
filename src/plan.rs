//! Reconciliation planning: disk state + registry → deletions and generations.
//!
//! The planner is pure over its inputs: it sees the file list from the scan
//! stage and never touches the filesystem itself. Existence checks for the
//! skip rule use the scanned set, so the plan reflects the disk state at scan
//! time.
//!
//! Policy interactions worth naming:
//! - With `delete_non_actual_sizes`, every file matching an original's
//!   derivative prefix is purged — not just currently-configured suffixes.
//!   This removes orphans from any previous size configuration.
//! - A file scheduled for deletion never counts as "already exists" for the
//!   `enable_rewrite = false` skip rule; purged paths are always regenerated.
//! - A file scheduled for deletion never acts as a generation source either,
//!   even when the current registry would classify it as an original (a
//!   derivative left behind by a removed size entry looks like one).
//! - Candidates whose guessed MIME type is not `image/*` are excluded from
//!   generation entirely, even when their name classifies as an original.

use crate::naming;
use crate::registry::{self, SizeSpec};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Skip-if-exists and purge policy for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    pub enable_rewrite: bool,
    pub delete_non_actual_sizes: bool,
}

/// One (original, size) pair to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub source: PathBuf,
    pub suffix: String,
    pub output: PathBuf,
}

/// The execution plan for one run, consumed once by the orchestrator.
#[derive(Debug, Default)]
pub struct Plan {
    /// Stale derivatives to remove before generating.
    pub deletions: Vec<PathBuf>,
    /// Pairs to (re)generate.
    pub generations: Vec<Generation>,
    /// Pairs skipped because the output already exists and rewrite is off.
    pub skips: Vec<Generation>,
}

/// Compute the reconciliation plan for the scanned `files`.
pub fn plan(files: &[PathBuf], specs: &[SizeSpec], policy: Policy) -> Plan {
    let suffixes = registry::suffixes(specs);
    let originals: Vec<&PathBuf> = files
        .iter()
        .filter(|f| naming::is_original(f, &suffixes) && is_image(f))
        .collect();

    let mut plan = Plan::default();
    let mut doomed = HashSet::new();

    if policy.delete_non_actual_sizes {
        for original in &originals {
            let parts = naming::split_path(original);
            for file in files {
                if file.parent() == original.parent()
                    && naming::is_derivative_of(file, &parts.stem)
                    && doomed.insert(file.clone())
                {
                    plan.deletions.push(file.clone());
                }
            }
        }
    }

    let on_disk: HashSet<&PathBuf> = files.iter().collect();

    for original in originals.iter().filter(|o| !doomed.contains(**o)) {
        for spec in specs {
            let output = naming::derivative_path(original, &spec.suffix);
            let generation = Generation {
                source: (*original).clone(),
                suffix: spec.suffix.clone(),
                output: output.clone(),
            };
            let exists = on_disk.contains(&output) && !doomed.contains(&output);
            if !policy.enable_rewrite && exists {
                plan.skips.push(generation);
            } else {
                plan.generations.push(generation);
            }
        }
    }

    plan
}

/// Whether the guessed content type for `path` is under `image/*`.
fn is_image(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|m| m.type_() == mime_guess::mime::IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FitMode;

    fn spec(suffix: &str) -> SizeSpec {
        SizeSpec {
            width: Some(100),
            height: Some(100),
            suffix: suffix.to_string(),
            mode: FitMode::Inset,
            fixed_canvas: false,
            background_transparent: false,
        }
    }

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    fn rewrite_off_purge_on() -> Policy {
        Policy {
            enable_rewrite: false,
            delete_non_actual_sizes: true,
        }
    }

    // =========================================================================
    // generation scheduling tests
    // =========================================================================

    #[test]
    fn schedules_every_original_size_pair() {
        let files = paths(&["d/a.jpg", "d/b.png"]);
        let plan = plan(&files, &[spec("sm"), spec("lg")], Policy::default());
        assert_eq!(plan.generations.len(), 4);
        assert!(plan.deletions.is_empty());
        assert!(
            plan.generations
                .iter()
                .any(|g| g.output == PathBuf::from("d/a-sm.jpg"))
        );
        assert!(
            plan.generations
                .iter()
                .any(|g| g.output == PathBuf::from("d/b-lg.png"))
        );
    }

    #[test]
    fn existing_output_skipped_when_rewrite_off() {
        let files = paths(&["d/a.jpg", "d/a-sm.jpg"]);
        let plan = plan(&files, &[spec("sm"), spec("lg")], Policy::default());
        assert_eq!(plan.generations.len(), 1);
        assert_eq!(plan.generations[0].suffix, "lg");
        assert_eq!(plan.skips.len(), 1);
        assert_eq!(plan.skips[0].suffix, "sm");
    }

    #[test]
    fn existing_output_regenerated_when_rewrite_on() {
        let files = paths(&["d/a.jpg", "d/a-sm.jpg"]);
        let policy = Policy {
            enable_rewrite: true,
            delete_non_actual_sizes: false,
        };
        let plan = plan(&files, &[spec("sm")], policy);
        assert_eq!(plan.generations.len(), 1);
        assert!(plan.skips.is_empty());
    }

    #[test]
    fn derivatives_are_not_treated_as_originals() {
        let files = paths(&["d/a.jpg", "d/a-sm.jpg", "d/a-300x200.jpg"]);
        let plan = plan(&files, &[spec("sm")], Policy::default());
        // only a.jpg spawns generations; a-sm.jpg exists so it is skipped
        assert!(plan.generations.is_empty());
        assert_eq!(plan.skips.len(), 1);
    }

    #[test]
    fn non_image_files_excluded_from_generation() {
        let files = paths(&["d/a.jpg", "d/notes.txt", "d/data.json"]);
        let plan = plan(&files, &[spec("sm")], Policy::default());
        assert_eq!(plan.generations.len(), 1);
        assert_eq!(plan.generations[0].source, PathBuf::from("d/a.jpg"));
    }

    // =========================================================================
    // stale purge tests
    // =========================================================================

    #[test]
    fn purge_removes_any_derivative_convention() {
        // "old" is no longer configured; the legacy size pattern is stale too
        let files = paths(&["d/a.jpg", "d/a-old.jpg", "d/a-300x200.jpg", "d/a-sm.jpg"]);
        let plan = plan(&files, &[spec("sm")], rewrite_off_purge_on());
        let mut deletions = plan.deletions.clone();
        deletions.sort();
        assert_eq!(
            deletions,
            paths(&["d/a-300x200.jpg", "d/a-old.jpg", "d/a-sm.jpg"])
        );
    }

    #[test]
    fn purged_paths_are_regenerated_despite_rewrite_off() {
        let files = paths(&["d/a.jpg", "d/a-sm.jpg"]);
        let plan = plan(&files, &[spec("sm")], rewrite_off_purge_on());
        assert_eq!(plan.deletions, paths(&["d/a-sm.jpg"]));
        assert_eq!(plan.generations.len(), 1);
        assert!(plan.skips.is_empty());
    }

    #[test]
    fn stale_cleanup_scenario() {
        // previous registry {a, b}; current registry {b, c}
        let files = paths(&["d/pic.jpg", "d/pic-a.jpg", "d/pic-b.jpg"]);
        let plan = plan(&files, &[spec("b"), spec("c")], rewrite_off_purge_on());

        // a and b are both purged (superstring match), b and c regenerate
        let mut deletions = plan.deletions.clone();
        deletions.sort();
        assert_eq!(deletions, paths(&["d/pic-a.jpg", "d/pic-b.jpg"]));

        let mut suffixes: Vec<_> = plan.generations.iter().map(|g| g.suffix.clone()).collect();
        suffixes.sort();
        assert_eq!(suffixes, vec!["b", "c"]);
    }

    #[test]
    fn purge_restricted_to_same_directory() {
        let files = paths(&["d/a.jpg", "other/a-sm.jpg"]);
        let plan = plan(&files, &[spec("lg")], rewrite_off_purge_on());
        assert!(plan.deletions.is_empty());
    }

    #[test]
    fn purge_matches_each_file_once() {
        // "cat-5-sm.jpg" is a derivative of both cat.jpg (prefix) and the
        // ambiguous original cat-5.jpg; it must be scheduled once
        let files = paths(&["d/cat.jpg", "d/cat-5-sm.jpg"]);
        let plan = plan(&files, &[spec("lg")], rewrite_off_purge_on());
        assert_eq!(plan.deletions.len(), 1);
    }

    #[test]
    fn purged_file_never_acts_as_a_source() {
        // "pic-a.jpg" classifies as an original under registry {b} but is
        // doomed by the purge; it must not spawn "pic-a-b.jpg"
        let files = paths(&["d/pic.jpg", "d/pic-a.jpg"]);
        let plan = plan(&files, &[spec("b")], rewrite_off_purge_on());
        assert_eq!(plan.deletions, paths(&["d/pic-a.jpg"]));
        assert_eq!(plan.generations.len(), 1);
        assert_eq!(plan.generations[0].source, PathBuf::from("d/pic.jpg"));
    }

    #[test]
    fn purge_disabled_leaves_stale_files() {
        let files = paths(&["d/a.jpg", "d/a-old.jpg"]);
        let plan = plan(&files, &[spec("sm")], Policy::default());
        assert!(plan.deletions.is_empty());
    }

    // =========================================================================
    // idempotence
    // =========================================================================

    #[test]
    fn second_run_reduces_to_skips() {
        // simulate a completed first run: all outputs on disk
        let files = paths(&["d/a.jpg", "d/a-sm.jpg", "d/a-lg.jpg"]);
        let plan = plan(&files, &[spec("sm"), spec("lg")], Policy::default());
        assert!(plan.generations.is_empty());
        assert_eq!(plan.skips.len(), 2);
    }
}
