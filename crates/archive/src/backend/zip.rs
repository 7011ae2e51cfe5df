//! Zip file archives.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use ::zip::ZipArchive as ZipReader;
use ::zip::result::ZipError;
use exn::ResultExt;
use tracing::instrument;

use crate::backend::{Archive, Entry};
use crate::error::{ErrorKind, Result};

/// A zip file on the local filesystem.
///
/// # Examples
///
/// ```no_run
/// use swatch_archive::{Archive, ZipArchive};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut archive = ZipArchive::open("/path/to/items.zip")?;
/// for index in 0..archive.len() {
///     let entry = archive.entry(index)?;
///     println!("{} ({:08x})", entry.name, entry.crc32);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ZipArchive {
    path: PathBuf,
    inner: ZipReader<BufReader<File>>,
}
impl ZipArchive {
    /// Opens the zip file at `path` and reads its central directory.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](ErrorKind::NotFound) if there is no file at
    /// `path`, or [`InvalidArchive`](ErrorKind::InvalidArchive) if the file is
    /// not a zip.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), entries))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) => {
                let kind = Self::map_io_error(&err, &path);
                return Err(err).or_raise(|| kind);
            },
        };
        let inner = ZipReader::new(BufReader::new(file)).or_raise(|| ErrorKind::InvalidArchive(path.clone()))?;
        tracing::Span::current().record("entries", inner.len());
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map_io_error(err: &std::io::Error, path: &Path) -> ErrorKind {
        match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(path.to_path_buf()),
        }
    }

    fn map_zip_error(err: &ZipError, index: usize) -> ErrorKind {
        match err {
            ZipError::FileNotFound => ErrorKind::OutOfRange(index),
            _ => ErrorKind::Entry(format!("#{index}")),
        }
    }
}

impl Archive for ZipArchive {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn entry(&mut self, index: usize) -> Result<Entry> {
        // Raw access skips setting up a decompressor just to look at metadata.
        let file = match self.inner.by_index_raw(index) {
            Ok(file) => file,
            Err(err) => {
                let kind = Self::map_zip_error(&err, index);
                return Err(err).or_raise(|| kind);
            },
        };
        Ok(Entry {
            name: file.name().to_string(),
            crc32: file.crc32(),
            size: file.size(),
            is_dir: file.is_dir(),
        })
    }

    #[instrument(level = "trace", skip(self), fields(archive = %self.path.display(), name, size))]
    fn read(&mut self, index: usize) -> Result<Vec<u8>> {
        let mut file = match self.inner.by_index(index) {
            Ok(file) => file,
            Err(err) => {
                let kind = Self::map_zip_error(&err, index);
                return Err(err).or_raise(|| kind);
            },
        };
        let name = file.name().to_string();
        tracing::Span::current().record("name", name.as_str()).record("size", file.size());
        let mut bytes = Vec::with_capacity(initial_capacity(file.size()));
        // The zip reader checks the CRC once the entry has been fully read.
        file.read_to_end(&mut bytes).or_raise(|| ErrorKind::Entry(name))?;
        Ok(bytes)
    }
}

/// Upper bound on the buffer reserved up front for an entry; larger entries
/// grow the buffer as they are read.
const MAX_PREALLOCATION: u64 = 1 << 24;

// The declared size comes from the archive's own headers and may be bogus.
fn initial_capacity(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOCATION)).unwrap_or_default()
}
