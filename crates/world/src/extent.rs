use crate::region::{BLOCKS_PER_REGION, RegionCoord};

/// Smallest axis-aligned rectangle of regions containing a set of regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub min: RegionCoord,
    pub max: RegionCoord,
}
impl Extent {
    /// Bounding extent of `coords`, or `None` if there are none.
    pub fn of<'a>(coords: impl IntoIterator<Item = &'a RegionCoord>) -> Option<Self> {
        coords.into_iter().fold(None, |extent: Option<Extent>, coord| {
            Some(match extent {
                None => Extent { min: *coord, max: *coord },
                Some(Extent { min, max }) => Extent {
                    min: RegionCoord::new(min.x.min(coord.x), min.z.min(coord.z)),
                    max: RegionCoord::new(max.x.max(coord.x), max.z.max(coord.z)),
                },
            })
        })
    }

    /// Regions along the x axis, inclusive of both edges.
    pub fn width_regions(&self) -> i64 {
        i64::from(self.max.x) - i64::from(self.min.x) + 1
    }

    /// Regions along the z axis, inclusive of both edges.
    pub fn depth_regions(&self) -> i64 {
        i64::from(self.max.z) - i64::from(self.min.z) + 1
    }

    pub fn width_blocks(&self) -> i64 {
        self.width_regions() * BLOCKS_PER_REGION
    }

    pub fn depth_blocks(&self) -> i64 {
        self.depth_regions() * BLOCKS_PER_REGION
    }

    pub fn contains(&self, coord: &RegionCoord) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x) && (self.min.z..=self.max.z).contains(&coord.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_has_no_extent() {
        assert_eq!(Extent::of(&[] as &[RegionCoord]), None);
    }

    #[test]
    fn test_single_region() {
        let extent = Extent::of(&[RegionCoord::new(3, -4)]).unwrap();
        assert_eq!(extent.min, extent.max);
        assert_eq!((extent.width_regions(), extent.depth_regions()), (1, 1));
        assert_eq!((extent.width_blocks(), extent.depth_blocks()), (512, 512));
    }

    #[test]
    fn test_sparse_regions() {
        let coords = [RegionCoord::new(-1, 0), RegionCoord::new(2, 5), RegionCoord::new(0, -3)];
        let extent = Extent::of(&coords).unwrap();
        assert_eq!(extent.min, RegionCoord::new(-1, -3));
        assert_eq!(extent.max, RegionCoord::new(2, 5));
        assert_eq!(extent.width_regions(), 4);
        assert_eq!(extent.depth_regions(), 9);
        assert_eq!(extent.width_blocks(), 4 * 512);
        assert!(coords.iter().all(|coord| extent.contains(coord)));
        assert!(!extent.contains(&RegionCoord::new(3, 0)));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let extent = Extent::of(&[RegionCoord::new(i32::MIN, 0), RegionCoord::new(i32::MAX, 0)]).unwrap();
        assert_eq!(extent.width_regions(), 1 << 32);
    }
}
