//! Backend trait for thumbnail generation and the production implementation.
//!
//! The [`ThumbnailBackend`] trait is the seam between the orchestration code
//! (which decides *what* to generate) and the pixel work (decode →
//! [`render`](super::engine::render) → encode). The production implementation
//! is [`RustBackend`] on the `image` crate; tests swap in a mock that records
//! operations without decoding anything.

use super::calculations::MimeFamily;
use super::engine::{self, RenderTarget};
use crate::registry::SizeSpec;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed for {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("encode failed for {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

/// Everything one generation step needs: explicit per-call state, no
/// globals shared between invocations.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub spec: SizeSpec,
    /// Canvas fill color for fixed-canvas padding.
    pub background: [u8; 3],
}

/// Trait for thumbnail generation backends.
pub trait ThumbnailBackend: Sync {
    /// Decode the source, render the size spec, encode to the output path.
    fn generate(&self, params: &GenerateParams) -> Result<(), BackendError>;
}

/// Production backend on the `image` crate: pure Rust decode, Lanczos3
/// resampling, encoder inferred from the output extension (which always
/// equals the source extension).
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Output format family for a path, keyed off the guessed MIME type.
fn family_for(path: &Path) -> MimeFamily {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    MimeFamily::from_mime(mime.essence_str())
}

impl ThumbnailBackend for RustBackend {
    fn generate(&self, params: &GenerateParams) -> Result<(), BackendError> {
        let img = image::ImageReader::open(&params.source)
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| BackendError::Decode {
                path: params.source.clone(),
                reason: e.to_string(),
            })?;

        let target = RenderTarget {
            background: params.background,
            family: family_for(&params.output),
        };
        let rendered = engine::render(&img, &params.spec, &target);

        rendered
            .save(&params.output)
            .map_err(|e| BackendError::Encode {
                path: params.output.clone(),
                reason: e.to_string(),
            })
    }
}
