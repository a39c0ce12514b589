//! Image operations — pure Rust, on the `image` crate.
//!
//! The module is split into:
//! - **Calculations**: pure dimension math and the background-alpha table
//!   (unit testable, no pixels)
//! - **Engine**: the compositing algorithms (fixed-canvas pad, aspect fit,
//!   fill crop) over decoded `DynamicImage`s
//! - **Backend**: the [`ThumbnailBackend`] seam between orchestration and
//!   pixel work, plus the production [`RustBackend`]

pub mod backend;
pub mod calculations;
pub mod engine;

pub use backend::{BackendError, GenerateParams, RustBackend, ThumbnailBackend};
pub use calculations::MimeFamily;
pub use engine::{RenderTarget, render};
