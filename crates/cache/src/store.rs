use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use swatch_color::Color;

use crate::AssetKey;

/// A derived color together with the checksum of the asset content it was
/// computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheEntry {
    pub color: Color,
    /// CRC-32 reported by the archive for the asset. The color is only valid
    /// while the archive still reports this checksum.
    pub checksum: u32,
}
impl CacheEntry {
    pub fn new(color: Color, checksum: u32) -> Self {
        Self { color, checksum }
    }

    /// Returns `true` if this entry was computed from content with `checksum`.
    pub fn is_fresh(&self, checksum: u32) -> bool {
        self.checksum == checksum
    }
}

/// In-memory mapping of [`AssetKey`] to [`CacheEntry`].
///
/// Iteration is always in ascending key order, so snapshots of the same
/// contents are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    entries: BTreeMap<AssetKey, CacheEntry>,
}
impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &AssetKey) -> Option<CacheEntry> {
        self.entries.get(key).copied()
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn put(&mut self, key: AssetKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn contains(&self, key: &AssetKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Lenient lookup: unknown assets report [`Color::TRANSPARENT`] rather
    /// than an error, since callers routinely ask about ids that were never
    /// in the archive.
    pub fn color_of(&self, id: u32, meta: u32) -> Color {
        self.entries.get(&AssetKey::new(id, meta)).map_or(Color::TRANSPARENT, |entry| entry.color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, AssetKey, CacheEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AssetKey> {
        self.entries.keys()
    }
}
impl FromIterator<(AssetKey, CacheEntry)> for Store {
    fn from_iter<T: IntoIterator<Item = (AssetKey, CacheEntry)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
impl<'a> IntoIterator for &'a Store {
    type Item = (&'a AssetKey, &'a CacheEntry);
    type IntoIter = Iter<'a, AssetKey, CacheEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RED: Color = Color::rgb(255, 0, 0);

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(35, 14)]
    #[case(u32::MAX, u32::MAX)]
    fn test_color_of_empty_store_is_unknown(#[case] id: u32, #[case] meta: u32) {
        assert_eq!(Store::new().color_of(id, meta), Color::TRANSPARENT);
    }

    #[test]
    fn test_put_overwrites() {
        let mut store = Store::new();
        let key = AssetKey::new(1, 0);
        store.put(key, CacheEntry::new(RED, 111));
        store.put(key, CacheEntry::new(Color::rgb(0, 0, 255), 222));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key), Some(CacheEntry::new(Color::rgb(0, 0, 255), 222)));
    }

    #[test]
    fn test_color_of_requires_exact_meta() {
        let store: Store = [(AssetKey::new(35, 1), CacheEntry::new(RED, 1))].into_iter().collect();
        assert_eq!(store.color_of(35, 1), RED);
        assert_eq!(store.color_of(35, 0), Color::TRANSPARENT);
        assert_eq!(store.get(&AssetKey::new(35, 0)), None);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut store = Store::new();
        for (id, meta) in [(5, 0), (1, 3), (1, 0), (300, 2)] {
            store.put(AssetKey::new(id, meta), CacheEntry::new(RED, id));
        }
        let keys: Vec<String> = store.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["1-0", "1-3", "5-0", "300-2"]);
    }

    #[test]
    fn test_freshness() {
        let entry = CacheEntry::new(RED, 111);
        assert!(entry.is_fresh(111));
        assert!(!entry.is_fresh(112));
    }
}
