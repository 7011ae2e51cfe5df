use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use exn::ResultExt;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::{Extent, RegionCoord, parse_filename};

/// Directory holding region files, relative to the world root.
pub const REGION_DIR: &str = "region";

/// The region files of a world save, keyed by their grid position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct World {
    regions: BTreeMap<RegionCoord, PathBuf>,
}
impl World {
    /// Scans `<root>/region/` for region files.
    ///
    /// Files whose names don't carry region coordinates (see
    /// [`parse_filename`]) are ignored, as are subdirectories.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](ErrorKind::NotFound) if the world has no region
    /// directory.
    #[instrument(skip_all, fields(root = %root.as_ref().display(), regions))]
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let dir = root.as_ref().join(REGION_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => exn::bail!(ErrorKind::NotFound(dir)),
            Err(err) if err.kind() == std::io::ErrorKind::NotADirectory => {
                exn::bail!(ErrorKind::NotADirectory(dir))
            },
            Err(err) => return Err(err).or_raise(|| ErrorKind::Io(dir)),
        };
        let mut regions = BTreeMap::new();
        for entry in entries {
            let entry = entry.or_raise(|| ErrorKind::Io(dir.clone()))?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(parse_filename) {
                Some(coord) => {
                    regions.insert(coord, path);
                },
                None => tracing::debug!(file = %path.display(), "ignoring file without region coordinates"),
            }
        }
        tracing::Span::current().record("regions", regions.len());
        Ok(Self { regions })
    }

    pub fn regions(&self) -> &BTreeMap<RegionCoord, PathBuf> {
        &self.regions
    }

    pub fn region(&self, coord: &RegionCoord) -> Option<&Path> {
        self.regions.get(coord).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Bounding extent of all regions, or `None` for a world without any.
    pub fn extent(&self) -> Option<Extent> {
        Extent::of(self.regions.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_world() {
        let root = tempfile::tempdir().unwrap();
        let region = root.path().join(REGION_DIR);
        fs::create_dir(&region).unwrap();
        for name in ["r.0.0.mca", "r.-1.2.mca", "r.oops.0.mca", "session.lock"] {
            fs::write(region.join(name), b"").unwrap();
        }
        fs::create_dir(region.join("r.5.5.mca")).unwrap();

        let world = World::open(root.path()).unwrap();
        assert_eq!(world.len(), 2);
        let coords: Vec<RegionCoord> = world.regions().keys().copied().collect();
        assert_eq!(coords, [RegionCoord::new(-1, 2), RegionCoord::new(0, 0)]);
        assert_eq!(world.region(&RegionCoord::new(0, 0)), Some(region.join("r.0.0.mca").as_path()));
        let extent = world.extent().unwrap();
        assert_eq!((extent.width_regions(), extent.depth_regions()), (2, 3));
    }

    #[test]
    fn test_empty_region_directory() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join(REGION_DIR)).unwrap();
        let world = World::open(root.path()).unwrap();
        assert!(world.is_empty());
        assert_eq!(world.extent(), None);
    }

    #[test]
    fn test_missing_region_directory() {
        let root = tempfile::tempdir().unwrap();
        let err = World::open(root.path()).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(root.path().join(REGION_DIR)));
    }
}
