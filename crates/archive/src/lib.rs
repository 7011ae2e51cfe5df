//! Read-only access to the archives texture images are shipped in.
//!
//! An [`Archive`] exposes, per entry, a name, the CRC-32 recorded for the
//! decompressed content, and the content itself. The checksum comes from the
//! archive's own metadata, so it is available without reading the entry.

pub mod backend;
pub mod error;

#[cfg(any(test, feature = "mock"))]
pub use crate::backend::MemoryArchive;
pub use crate::backend::{Archive, Entry, ZipArchive};
