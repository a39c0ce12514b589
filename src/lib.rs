//! # thumbsync
//!
//! Batch thumbnail generator that keeps the on-disk set of derivative images
//! consistent with a declared size configuration over repeated runs.
//!
//! Derivatives are named `<stem>-<suffix>.<ext>` next to their original.
//! A run scans the working directory, classifies every file as an original
//! or a derivative, deletes derivatives that no longer correspond to a
//! configured size, and (re)generates the missing pairs:
//!
//! ```text
//! photos/
//! ├── dawn.jpg              # original
//! ├── dawn-md.jpg           # derivative for suffix "md"
//! ├── dawn-1024x0.jpg       # derivative for a derive-height size
//! └── dawn-300x200.jpg      # legacy-named derivative (still recognized)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | derivative naming convention: path split, suffix rules, original/derivative classification |
//! | [`registry`] | validates configured sizes into canonical [`registry::SizeSpec`]s |
//! | [`imaging`] | the resize/pad/crop engine and the backend seam over the `image` crate |
//! | [`scan`] | directory enumeration (recursive or flat) |
//! | [`plan`] | reconciliation: disk state + registry → deletions, generations, skips |
//! | [`run`] | the orchestrator driving scan → plan → delete → generate, with per-file outcomes |
//! | [`config`] | `thumbsync.toml` loading and run options |
//! | [`output`] | CLI rendering of plans and reports |
//!
//! # Design Decisions
//!
//! ## Naming is the database
//!
//! There is no index file: the relationship between originals and
//! derivatives lives entirely in filenames. This makes runs idempotent and
//! restartable — the scan at the start of each run is the only source of
//! truth — at the cost of a documented prefix-match ambiguity (see
//! [`naming`]).
//!
//! ## Per-file error isolation
//!
//! Configuration problems abort before any side effect. Once the generate
//! loop starts, a corrupt source or a failed write is recorded in the run
//! report and the loop moves on; one bad file never blocks the rest.
//!
//! ## Pure-Rust imaging
//!
//! All pixel work goes through the `image` crate (Lanczos3 resampling), so
//! the binary has no system dependencies. The compositing policy — fit,
//! fill-crop, fixed-canvas padding, background alpha by output format — is
//! implemented in [`imaging::engine`] on top of those primitives.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod plan;
pub mod registry;
pub mod run;
pub mod scan;
