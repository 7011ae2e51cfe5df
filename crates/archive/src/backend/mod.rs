//! Archive trait and implementations.

#[cfg(any(test, feature = "mock"))]
mod memory;
mod zip;

#[cfg(any(test, feature = "mock"))]
pub use self::memory::MemoryArchive;
pub use self::zip::ZipArchive;
use crate::error::Result;

/// Metadata for a single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name as stored in the archive, including any directories.
    pub name: String,
    /// CRC-32 of the decompressed content, as recorded by the archive.
    pub crc32: u32,
    /// Decompressed size in bytes.
    pub size: u64,
    pub is_dir: bool,
}

/// Indexed, read-only access to the entries of an archive.
///
/// Metadata and content are fetched separately so that callers can decide
/// from the name and checksum alone whether the content is worth reading.
///
/// # Examples
///
/// ```
/// use swatch_archive::{Archive, error::Result};
///
/// fn total_size(archive: &mut dyn Archive) -> Result<u64> {
///     let mut total = 0;
///     for index in 0..archive.len() {
///         total += archive.entry(index)?.size;
///     }
///     Ok(total)
/// }
/// ```
pub trait Archive {
    /// Number of entries, directories included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metadata for the entry at `index`, without reading its content.
    fn entry(&mut self, index: usize) -> Result<Entry>;

    /// Complete decompressed content of the entry at `index`.
    ///
    /// Returns [`Entry`](crate::error::ErrorKind::Entry) if the content
    /// cannot be read or does not match its recorded checksum.
    fn read(&mut self, index: usize) -> Result<Vec<u8>>;
}
