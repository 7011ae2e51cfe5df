//! JSON snapshot format for a [`Store`].
//!
//! A snapshot is a single object keyed by the textual [`AssetKey`], in
//! ascending key order, whose values carry the archive checksum and the
//! color packed as `0xRRGGBBAA`:
//!
//! ```json
//! {
//!   "1-0": {
//!     "crc": 111,
//!     "color": 4278190335
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::Path;

use exn::ResultExt;
use serde::{Deserialize, Serialize};
use swatch_color::Color;
use tempfile::NamedTempFile;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::{AssetKey, CacheEntry, Store};

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    crc: u32,
    color: u32,
}
impl From<&CacheEntry> for Record {
    fn from(entry: &CacheEntry) -> Self {
        Self {
            crc: entry.checksum,
            color: entry.color.pack(),
        }
    }
}
impl From<Record> for CacheEntry {
    fn from(record: Record) -> Self {
        CacheEntry::new(Color::unpack(record.color), record.crc)
    }
}

/// Renders a store as a snapshot document.
pub fn encode(store: &Store) -> Result<String> {
    let snapshot: BTreeMap<&AssetKey, Record> = store.iter().map(|(key, entry)| (key, entry.into())).collect();
    serde_json::to_string_pretty(&snapshot).or_raise(|| ErrorKind::Encode)
}

/// Parses a snapshot document.
///
/// # Errors
///
/// Returns [`ErrorKind::Parse`] for anything that isn't a well-formed
/// snapshot; there is no partial recovery of individual entries.
pub fn decode(text: &str) -> Result<Store> {
    decode_slice(text.as_bytes())
}

fn decode_slice(bytes: &[u8]) -> Result<Store> {
    let snapshot: BTreeMap<AssetKey, Record> = serde_json::from_slice(bytes).or_raise(|| ErrorKind::Parse)?;
    Ok(snapshot.into_iter().map(|(key, record)| (key, record.into())).collect())
}

/// Reads and decodes the snapshot at `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display(), entries))]
pub fn read(path: impl AsRef<Path>) -> Result<Store> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == IoErrorKind::NotFound => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
        Err(err) => return Err(err).or_raise(|| ErrorKind::Io(path.to_path_buf())),
    };
    let store = decode_slice(&bytes)?;
    tracing::Span::current().record("entries", store.len());
    Ok(store)
}

/// Encodes `store` and replaces the snapshot at `path` with it.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it, so readers see either the old snapshot or the new one.
#[instrument(skip_all, fields(path = %path.as_ref().display(), entries = store.len()))]
pub fn write(path: impl AsRef<Path>, store: &Store) -> Result<()> {
    let path = path.as_ref();
    let io = || ErrorKind::Io(path.to_path_buf());
    let text = encode(store)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).or_raise(io)?;
    let mut file = NamedTempFile::new_in(dir).or_raise(io)?;
    file.write_all(text.as_bytes()).or_raise(io)?;
    file.as_file().sync_all().or_raise(io)?;
    file.persist(path).map_err(|err| err.error).or_raise(io)?;
    tracing::debug!("wrote cache snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn store(entries: &[(u32, u32, Color, u32)]) -> Store {
        entries
            .iter()
            .map(|&(id, meta, color, crc)| (AssetKey::new(id, meta), CacheEntry::new(color, crc)))
            .collect()
    }

    #[rstest]
    #[case(store(&[]))]
    #[case(store(&[(1, 0, RED, 111)]))]
    #[case(store(&[(5, 0, BLUE, 222), (1, 3, RED, 7), (1, 0, Color::TRANSPARENT, u32::MAX)]))]
    fn test_round_trip(#[case] store: Store) {
        assert_eq!(decode(&encode(&store).unwrap()).unwrap(), store);
    }

    #[test]
    fn test_encode_layout() {
        let mut store = Store::new();
        // Inserted out of order on purpose.
        store.put(AssetKey::new(5, 0), CacheEntry::new(BLUE, 222));
        store.put(AssetKey::new(1, 0), CacheEntry::new(RED, 111));
        let expected = r#"{
  "1-0": {
    "crc": 111,
    "color": 4278190335
  },
  "5-0": {
    "crc": 222,
    "color": 65535
  }
}"#;
        assert_eq!(encode(&store).unwrap(), expected);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&Store::new()).unwrap(), "{}");
    }

    #[test]
    fn test_decode_accepts_compact_documents() {
        let store = decode(r#"{"2-4": {"crc": 5234231, "color": 2489974272}, "2": {"crc": 1, "color": 255}}"#).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&AssetKey::new(2, 4)), Some(CacheEntry::new(Color::unpack(2489974272), 5234231)));
        assert_eq!(store.color_of(2, 0), Color::new(0, 0, 0, 255));
    }

    #[rstest]
    #[case("")]
    #[case("{")]
    #[case("[]")]
    #[case(r#"{"1-0": {"crc": 111}}"#)]
    #[case(r#"{"1-0": {"crc": -1, "color": 0}}"#)]
    #[case(r#"{"1-0": {"crc": 1.5, "color": 0}}"#)]
    #[case(r#"{"stone": {"crc": 1, "color": 0}}"#)]
    #[case(r#"{"1-0": {"crc": 1, "color": 4294967296}}"#)]
    #[case(r#"{"1-0": {"crc": 1, "color": 0},}"#)]
    fn test_decode_malformed(#[case] text: &str) {
        let err = decode(text).unwrap_err();
        assert_eq!(*err, ErrorKind::Parse);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.colors.json");
        let err = read(&path).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("items.colors.json");
        let expected = store(&[(1, 0, RED, 111), (5, 0, BLUE, 222)]);
        write(&path, &expected).unwrap();
        assert_eq!(read(&path).unwrap(), expected);
        assert_eq!(fs::read_to_string(&path).unwrap(), encode(&expected).unwrap());
    }

    #[test]
    fn test_write_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.colors.json");
        write(&path, &store(&[(1, 0, RED, 1), (2, 0, RED, 2), (3, 0, RED, 3)])).unwrap();
        let smaller = store(&[(9, 9, BLUE, 9)]);
        write(&path, &smaller).unwrap();
        assert_eq!(read(&path).unwrap(), smaller);
        // Only the snapshot is left behind, no temporary files.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.colors.json");
        fs::write(&path, b"{\"1-0\": {\"crc\": 1, \"col").unwrap();
        assert_eq!(*read(&path).unwrap_err(), ErrorKind::Parse);
    }
}
