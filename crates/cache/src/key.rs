use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, ErrorKind};

/// Identifies a texture asset: a numeric id plus a variant (`meta`).
///
/// The textual form is `"<id>-<meta>"`; a bare `"<id>"` parses with a meta
/// of `0`. Ordering is by `id`, then `meta`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetKey {
    pub id: u32,
    pub meta: u32,
}
impl AssetKey {
    pub const fn new(id: u32, meta: u32) -> Self {
        Self { id, meta }
    }

    /// Parses the key out of an archive entry name such as
    /// `"textures/405-3.png"`: leading directories and everything from the
    /// first `.` of the file name are ignored.
    ///
    /// ```rust
    /// use swatch_cache::AssetKey;
    /// assert_eq!(AssetKey::from_file_name("405-3.png").unwrap(), AssetKey::new(405, 3));
    /// assert_eq!(AssetKey::from_file_name("blocks/17.png").unwrap(), AssetKey::new(17, 0));
    /// assert!(AssetKey::from_file_name("README.md").is_err());
    /// ```
    pub fn from_file_name(name: &str) -> Result<Self, Error> {
        let file_name = Path::new(name).file_name().and_then(|n| n.to_str()).unwrap_or(name);
        let stem = file_name.split_once('.').map_or(file_name, |(stem, _)| stem);
        stem.parse()
    }
}

fn digits(s: &str) -> Option<u32> {
    // `u32::from_str` accepts a leading `+`, which isn't part of the grammar.
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for AssetKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, meta) = match s.split_once('-') {
            Some((id, meta)) => (digits(id), digits(meta)),
            None => (digits(s), Some(0)),
        };
        match id.zip(meta) {
            Some((id, meta)) => Ok(Self { id, meta }),
            None => exn::bail!(ErrorKind::InvalidKey(s.to_string())),
        }
    }
}
impl Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}", self.id, self.meta)
    }
}
impl From<(u32, u32)> for AssetKey {
    fn from((id, meta): (u32, u32)) -> Self {
        Self { id, meta }
    }
}

// Keys are object field names in the snapshot, so they go through their
// textual form rather than as a struct.
impl Serialize for AssetKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> Deserialize<'de> for AssetKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(|_| serde::de::Error::custom(format!("invalid asset key: {text:?}")))
    }
}
