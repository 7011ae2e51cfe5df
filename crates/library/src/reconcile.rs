use std::fmt;

use exn::ResultExt;
use swatch_archive::Archive;
use swatch_cache::{AssetKey, CacheEntry, Store};
use swatch_color::{Color, Extractor};
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};

/// Turns encoded image bytes into a representative color.
pub trait Sampler {
    fn sample(&self, bytes: &[u8]) -> swatch_color::error::Result<Color>;
}

impl Sampler for Extractor {
    fn sample(&self, bytes: &[u8]) -> swatch_color::error::Result<Color> {
        Extractor::sample(self, bytes)
    }
}

/// An archive entry that looked like an asset but produced no color.
#[derive(Debug)]
pub struct EntryFailure {
    pub name: String,
    /// `None` when the entry's metadata couldn't be read, so its name (and
    /// key) is unknown.
    pub key: Option<AssetKey>,
    pub error: Error,
}

/// What a reconciliation pass did, entry by entry.
#[derive(Debug, Default)]
pub struct Report {
    /// Entries whose cached color was reused.
    pub hits: usize,
    /// Entries that were read and sampled.
    pub misses: usize,
    /// Previously cached keys no longer present (or no longer producing a
    /// color).
    pub removed: usize,
    /// Entry names that don't denote an asset key.
    pub skipped: Vec<String>,
    pub failures: Vec<EntryFailure>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cached, {} sampled, {} removed, {} skipped, {} failed",
            self.hits,
            self.misses,
            self.removed,
            self.skipped.len(),
            self.failures.len()
        )
    }
}

#[derive(Debug)]
pub struct Reconciliation {
    pub store: Store,
    /// `true` if `store` differs from the prior snapshot and should be
    /// persisted.
    pub modified: bool,
    pub report: Report,
}

/// Builds a fresh [`Store`] for `archive`, reusing entries of `prior` whose
/// checksum still matches the archive's.
///
/// Only cache misses are read from the archive. Entries that fail to read or
/// decode are reported and left out of the store, so lookups fall back to
/// [`Color::TRANSPARENT`] and the next pass tries them again; a failure never
/// discards colors already computed. If the archive lists the same key twice
/// the later entry wins.
#[instrument(skip_all, fields(entries = archive.len(), prior = prior.len(), hits, misses, removed))]
pub fn reconcile(archive: &mut dyn Archive, prior: &Store, sampler: &dyn Sampler) -> Reconciliation {
    let mut store = Store::new();
    let mut report = Report::default();

    for index in 0..archive.len() {
        let entry = match archive.entry(index).or_raise(|| ErrorKind::Read(format!("#{index}"))) {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(index, error = ?error, "skipping unreadable archive entry");
                report.failures.push(EntryFailure {
                    name: format!("#{index}"),
                    key: None,
                    error,
                });
                continue;
            },
        };
        if entry.is_dir {
            continue;
        }
        let Ok(key) = AssetKey::from_file_name(&entry.name) else {
            tracing::debug!(name = %entry.name, "entry is not an asset");
            report.skipped.push(entry.name);
            continue;
        };

        if let Some(cached) = prior.get(&key)
            && cached.is_fresh(entry.crc32)
        {
            store.put(key, cached);
            report.hits += 1;
            continue;
        }

        match sample_entry(archive, index, &entry.name, sampler) {
            Ok(color) => {
                tracing::trace!(%key, %color, "sampled");
                store.put(key, CacheEntry::new(color, entry.crc32));
                report.misses += 1;
            },
            Err(error) => {
                tracing::warn!(name = %entry.name, error = ?error, "no color for asset");
                report.failures.push(EntryFailure {
                    name: entry.name,
                    key: Some(key),
                    error,
                });
            },
        }
    }

    report.removed = prior.keys().filter(|key| !store.contains(key)).count();
    let modified = report.misses > 0 || report.removed > 0;

    let span = tracing::Span::current();
    span.record("hits", report.hits);
    span.record("misses", report.misses);
    span.record("removed", report.removed);

    Reconciliation { store, modified, report }
}

fn sample_entry(archive: &mut dyn Archive, index: usize, name: &str, sampler: &dyn Sampler) -> Result<Color> {
    let bytes = archive.read(index).or_raise(|| ErrorKind::Read(name.to_string()))?;
    sampler.sample(&bytes).or_raise(|| ErrorKind::Decode(name.to_string()))
}
