//! Keeps a color cache in step with a texture archive.
//!
//! [`reconcile`] compares every archive entry against the previous snapshot,
//! reusing colors whose checksum still matches and sampling the rest.
//! [`Palette`] wraps that in a load-once session bound to an archive file and
//! its snapshot on disk.

pub mod error;
mod palette;
mod reconcile;

pub use crate::palette::Palette;
pub use crate::reconcile::{EntryFailure, Reconciliation, Report, Sampler, reconcile};
