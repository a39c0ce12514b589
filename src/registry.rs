//! Size registry: validates raw config entries into canonical [`SizeSpec`]s.
//!
//! Normalization happens once, before any I/O. Problems here (no dimensions,
//! duplicate suffixes) are configuration errors and abort the run — nothing
//! is partially written.

use crate::config::{ConfigError, FitMode, RawSize, RunConfig};
use crate::naming;
use std::collections::HashSet;

/// One canonical target size. Immutable after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSpec {
    /// Target width; `None` means derive from the source aspect ratio.
    pub width: Option<u32>,
    /// Target height; `None` means derive from the source aspect ratio.
    pub height: Option<u32>,
    /// Naming token appended to the stem. Unique across the registry.
    pub suffix: String,
    pub mode: FitMode,
    /// Pad output to exactly `width x height` with background fill.
    /// Always false for outbound mode (crop already yields exact dimensions).
    pub fixed_canvas: bool,
    pub background_transparent: bool,
}

/// Validate and normalize the configured sizes.
///
/// Each entry inherits the run-level defaults for the fields it leaves unset.
/// Fails on an empty size list, an entry with neither dimension, or a suffix
/// collision.
pub fn normalize(config: &RunConfig) -> Result<Vec<SizeSpec>, ConfigError> {
    if config.sizes.is_empty() {
        return Err(ConfigError::NoSizes);
    }

    let mut specs = Vec::with_capacity(config.sizes.len());
    let mut seen = HashSet::new();

    for (index, raw) in config.sizes.iter().enumerate() {
        let spec = normalize_entry(raw, config, index)?;
        if !seen.insert(spec.suffix.clone()) {
            return Err(ConfigError::DuplicateSuffix(spec.suffix));
        }
        specs.push(spec);
    }

    Ok(specs)
}

fn normalize_entry(
    raw: &RawSize,
    defaults: &RunConfig,
    index: usize,
) -> Result<SizeSpec, ConfigError> {
    if raw.width.is_none() && raw.height.is_none() {
        return Err(ConfigError::MissingDimensions(index));
    }

    let mode = raw.mode.unwrap_or(defaults.mode);
    let fixed_canvas = raw.fixed_canvas.unwrap_or(defaults.fixed_canvas)
        && mode != FitMode::Outbound;
    let suffix = raw
        .suffix
        .clone()
        .unwrap_or_else(|| naming::default_suffix(raw.width, raw.height));

    Ok(SizeSpec {
        width: raw.width,
        height: raw.height,
        suffix,
        mode,
        fixed_canvas,
        background_transparent: raw
            .background_transparent
            .unwrap_or(defaults.background_transparent),
    })
}

/// The suffixes of every spec, in registry order.
pub fn suffixes(specs: &[SizeSpec]) -> Vec<String> {
    specs.iter().map(|s| s.suffix.clone()).collect()
}
