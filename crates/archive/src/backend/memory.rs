//! In-memory archive for testing.

use exn::OptionExt;

use crate::backend::{Archive, Entry};
use crate::error::{ErrorKind, Result};

struct MemoryEntry {
    name: String,
    crc32: u32,
    // `None` simulates an entry whose content cannot be read.
    data: Option<Vec<u8>>,
}

/// In-memory [`Archive`] for testing.
///
/// Checksums are computed with CRC-32 unless given explicitly, and every
/// successful or failed [`read`](Archive::read) is counted so that tests can
/// assert which entries were actually opened.
///
/// # Examples
///
/// ```ignore
/// use swatch_archive::{Archive, MemoryArchive};
///
/// let mut archive = MemoryArchive::with_files([("1-0.png", b"...")]);
/// assert_eq!(archive.entry(0).unwrap().crc32, crc32fast::hash(b"..."));
/// assert_eq!(archive.read(0).unwrap(), b"...");
/// assert_eq!(archive.reads(), 1);
/// ```
#[derive(Default)]
pub struct MemoryArchive {
    entries: Vec<MemoryEntry>,
    reads: usize,
}

impl MemoryArchive {
    /// Create an archive from `(name, content)` pairs; checksums are the
    /// CRC-32 of each content.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        let mut archive = Self::default();
        for (name, data) in files {
            let data = data.into();
            archive = archive.with_entry(name, crc32fast::hash(&data), data);
        }
        archive
    }

    /// Add an entry with an explicit checksum.
    pub fn with_entry(mut self, name: impl Into<String>, crc32: u32, data: impl Into<Vec<u8>>) -> Self {
        self.entries.push(MemoryEntry {
            name: name.into(),
            crc32,
            data: Some(data.into()),
        });
        self
    }

    /// Add an entry that is listed but whose content cannot be read.
    pub fn with_unreadable(mut self, name: impl Into<String>, crc32: u32) -> Self {
        self.entries.push(MemoryEntry {
            name: name.into(),
            crc32,
            data: None,
        });
        self
    }

    /// Number of [`read`](Archive::read) calls so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    fn get(&self, index: usize) -> Result<&MemoryEntry> {
        self.entries.get(index).ok_or_raise(|| ErrorKind::OutOfRange(index))
    }
}

impl Archive for MemoryArchive {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&mut self, index: usize) -> Result<Entry> {
        let entry = self.get(index)?;
        Ok(Entry {
            name: entry.name.clone(),
            crc32: entry.crc32,
            size: entry.data.as_ref().map_or(0, |data| data.len() as u64),
            is_dir: entry.name.ends_with('/'),
        })
    }

    fn read(&mut self, index: usize) -> Result<Vec<u8>> {
        self.reads += 1;
        let entry = self.get(index)?;
        entry.data.clone().ok_or_raise(|| ErrorKind::Entry(entry.name.clone()))
    }
}
