//! The orchestrator: scan → plan → delete stale → generate → report.
//!
//! A run is a sequence of independent per-file steps. Configuration problems
//! are fatal and surface before any side effect; per-pair decode/encode/IO
//! failures are recorded in the report and never abort the run.
//!
//! Generation is parallelized with rayon across originals: one worker owns
//! one original and all its sizes, so no two workers ever target the same
//! output path. All stale deletions complete before any worker starts.

use crate::config::{ConfigError, RunConfig};
use crate::imaging::{GenerateParams, ThumbnailBackend};
use crate::naming;
use crate::plan::{self, Generation, Plan, Policy};
use crate::registry::{self, SizeSpec};
use crate::scan::{self, ScanError};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("cannot prepare working directory {0}: {1}")]
    Prepare(PathBuf, std::io::Error),
}

/// Result of one generation or deletion step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Created,
    Skipped { reason: String },
    Deleted,
    Failed { error: String },
}

/// Per-file result, used for reporting only — nothing is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DerivativeRecord {
    /// Original the step belongs to; absent for stale-purge deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// The file written, removed, or skipped.
    pub output: PathBuf,
    pub outcome: Outcome,
}

/// All per-file results of one run, in deletions-then-generations order.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub records: Vec<DerivativeRecord>,
}

impl RunReport {
    pub fn count(&self, matches: impl Fn(&Outcome) -> bool) -> usize {
        self.records.iter().filter(|r| matches(&r.outcome)).count()
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Deleted))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }
}

/// Drives end-to-end runs against a validated configuration.
///
/// Construction normalizes the size registry, so a `Runner` only exists for
/// valid configurations (fail fast, nothing partially written).
pub struct Runner<B: ThumbnailBackend> {
    config: RunConfig,
    specs: Vec<SizeSpec>,
    background: [u8; 3],
    backend: B,
}

impl<B: ThumbnailBackend> Runner<B> {
    pub fn new(config: RunConfig, backend: B) -> Result<Self, ConfigError> {
        let specs = registry::normalize(&config)?;
        let background = config.background_rgb()?;
        Ok(Self {
            config,
            specs,
            background,
            backend,
        })
    }

    pub fn specs(&self) -> &[SizeSpec] {
        &self.specs
    }

    /// Ensure the working directory exists, creating parents as needed.
    ///
    /// The only filesystem mutation outside image writes and deletes.
    pub fn prepare(&self) -> Result<(), RunError> {
        fs::create_dir_all(&self.config.dir)
            .map_err(|e| RunError::Prepare(self.config.dir.clone(), e))
    }

    fn policy(&self) -> Policy {
        Policy {
            enable_rewrite: self.config.enable_rewrite,
            delete_non_actual_sizes: self.config.delete_non_actual_sizes,
        }
    }

    /// Compute the reconciliation plan without touching the filesystem.
    pub fn plan(&self) -> Result<Plan, RunError> {
        let files = scan::scan(&self.config.dir, self.config.recursive)?;
        Ok(plan::plan(&files, &self.specs, self.policy()))
    }

    /// Run the full orchestration: prepare → scan → plan → delete → generate.
    pub fn run(&self) -> Result<RunReport, RunError> {
        self.prepare()?;
        let plan = self.plan()?;
        let mut report = RunReport::default();

        // deletions complete strictly before any generation starts
        for path in &plan.deletions {
            report.records.push(delete_file(path, None));
        }

        let units = group_by_source(&plan.generations);
        let mut generated: Vec<DerivativeRecord> = units
            .par_iter()
            .flat_map(|unit| self.generate_unit(unit))
            .collect();
        report.records.append(&mut generated);

        for skip in &plan.skips {
            report.records.push(DerivativeRecord {
                source: Some(skip.source.clone()),
                suffix: Some(skip.suffix.clone()),
                output: skip.output.clone(),
                outcome: Outcome::Skipped {
                    reason: "output already exists".to_string(),
                },
            });
        }

        Ok(report)
    }

    /// Generate every size of one original. A failed pair is recorded and the
    /// remaining pairs still run.
    fn generate_unit(&self, unit: &[&Generation]) -> Vec<DerivativeRecord> {
        unit.iter()
            .map(|generation| {
                let spec = self
                    .specs
                    .iter()
                    .find(|s| s.suffix == generation.suffix)
                    .expect("plan suffixes come from this registry");
                let params = GenerateParams {
                    source: generation.source.clone(),
                    output: generation.output.clone(),
                    spec: spec.clone(),
                    background: self.background,
                };
                let outcome = match self.backend.generate(&params) {
                    Ok(()) => Outcome::Created,
                    Err(e) => Outcome::Failed {
                        error: e.to_string(),
                    },
                };
                DerivativeRecord {
                    source: Some(generation.source.clone()),
                    suffix: Some(generation.suffix.clone()),
                    output: generation.output.clone(),
                    outcome,
                }
            })
            .collect()
    }

    /// Every on-disk derivative of `original` (prefix match, any suffix
    /// convention), for point lookup outside a full run.
    pub fn list_derivatives(&self, original: &Path) -> Result<Vec<PathBuf>, RunError> {
        let parts = naming::split_path(original);
        let siblings = scan::scan(&parts.dir, false)?;
        Ok(siblings
            .into_iter()
            .filter(|f| naming::is_derivative_of(f, &parts.stem))
            .collect())
    }

    /// Remove an original together with all of its derivatives, leaving
    /// unrelated files untouched. Used when a source record goes away.
    pub fn delete_with_derivatives(&self, original: &Path) -> Result<RunReport, RunError> {
        let mut report = RunReport::default();
        for derivative in self.list_derivatives(original)? {
            report
                .records
                .push(delete_file(&derivative, Some(original.to_path_buf())));
        }
        report.records.push(delete_file(original, None));
        Ok(report)
    }
}

fn delete_file(path: &Path, source: Option<PathBuf>) -> DerivativeRecord {
    let outcome = match fs::remove_file(path) {
        Ok(()) => Outcome::Deleted,
        Err(e) => Outcome::Failed {
            error: e.to_string(),
        },
    };
    DerivativeRecord {
        source,
        suffix: None,
        output: path.to_path_buf(),
        outcome,
    }
}

/// Group generations by source, preserving plan order. Each group is an
/// independent unit of parallel work.
fn group_by_source(generations: &[Generation]) -> Vec<Vec<&Generation>> {
    let mut units: Vec<(&PathBuf, Vec<&Generation>)> = Vec::new();
    for generation in generations {
        match units.iter_mut().find(|(s, _)| **s == generation.source) {
            Some((_, unit)) => unit.push(generation),
            None => units.push((&generation.source, vec![generation])),
        }
    }
    units.into_iter().map(|(_, unit)| unit).collect()
}
