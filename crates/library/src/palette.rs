use std::path::{Path, PathBuf};

use exn::ResultExt;
use swatch_archive::{Archive, ZipArchive};
use swatch_cache::error::ErrorKind as CacheErrorKind;
use swatch_cache::{Store, codec};
use swatch_color::{Color, Extractor};
use swatch_config::Config;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::reconcile::{Reconciliation, Report, reconcile};

/// Colors of every asset in a texture archive, backed by a snapshot file so
/// unchanged assets aren't sampled again on the next run.
///
/// Lookups before a successful [`load`](Palette::load) see an empty palette.
#[derive(Debug)]
pub struct Palette {
    archive: PathBuf,
    cache: PathBuf,
    extractor: Extractor,
    store: Store,
    loaded: bool,
}

impl Palette {
    pub fn new(archive: impl Into<PathBuf>, cache: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            cache: cache.into(),
            extractor: Extractor::default(),
            store: Store::new(),
            loaded: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.archive, config.cache_path()).with_extractor(config.extraction.extractor())
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Opens the archive, reconciles it against the snapshot and persists the
    /// snapshot if anything changed.
    ///
    /// A missing or corrupt snapshot only means every asset is sampled again,
    /// and failing to write the new one is logged rather than returned: the
    /// palette is still usable in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Archive`](ErrorKind::Archive) if the archive can't be opened,
    /// in which case the palette is left as it was.
    #[instrument(skip(self), fields(archive = %self.archive.display(), cache = %self.cache.display()))]
    pub fn load(&mut self) -> Result<Report> {
        let mut archive = ZipArchive::open(&self.archive).or_raise(|| ErrorKind::Archive(self.archive.clone()))?;
        Ok(self.load_from(&mut archive))
    }

    /// Like [`load`](Self::load), with an already opened archive.
    pub fn load_from(&mut self, archive: &mut dyn Archive) -> Report {
        let prior = read_snapshot(&self.cache);
        let Reconciliation { store, modified, report } = reconcile(archive, &prior, &self.extractor);
        if modified {
            match codec::write(&self.cache, &store) {
                Ok(()) => tracing::debug!(entries = store.len(), "snapshot written"),
                Err(err) => tracing::warn!(error = ?err, "could not write color snapshot; colors stay in memory"),
            }
        }
        tracing::info!(colors = store.len(), "{report}");
        self.store = store;
        self.loaded = true;
        report
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Color of asset `id:meta`, or [`Color::TRANSPARENT`] if it has none.
    pub fn color_of(&self, id: u32, meta: u32) -> Color {
        self.store.color_of(id, meta)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache
    }
}

fn read_snapshot(path: &Path) -> Store {
    match codec::read(path) {
        Ok(store) => store,
        Err(err) if matches!(*err, CacheErrorKind::NotFound(_)) => {
            tracing::info!("no color snapshot yet");
            Store::new()
        },
        Err(err) => {
            tracing::warn!(error = ?err, "ignoring unusable color snapshot");
            Store::new()
        },
    }
}
