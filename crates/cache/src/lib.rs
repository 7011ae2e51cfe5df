//! Checksum-keyed cache of derived asset colors.
//!
//! The cache is not the source of truth - the archive is. Each entry records
//! the CRC-32 the archive reported for the asset when its color was
//! computed; an entry is only reused while the archive still reports that
//! same checksum. If the snapshot file is deleted or corrupted, it is
//! rebuilt on the next load.
//!
//! # Architecture
//! - [`AssetKey`]: `(id, meta)` identifier parsed from archive entry names.
//! - [`Store`]: sorted in-memory mapping of keys to [`CacheEntry`].
//! - [`codec`]: JSON snapshot (de)serialization and atomic file replacement.

pub mod codec;
pub mod error;
mod key;
mod store;

pub use crate::key::AssetKey;
pub use crate::store::{CacheEntry, Store};
