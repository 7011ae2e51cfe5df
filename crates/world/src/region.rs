use std::fmt::{Display, Formatter, Result as FmtResult};

/// Number of blocks along one side of a region (32 chunks of 16 blocks).
pub const BLOCKS_PER_REGION: i64 = 32 * 16;

/// Position of a region file on the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionCoord {
    pub x: i32,
    pub z: i32,
}
impl RegionCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}
impl Display for RegionCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Parses the coordinates out of a region file name such as `"r.1.-2.mca"`.
///
/// The name needs at least three `.` separators; the segments between the
/// first and second, and second and third, are the `x` and `z` coordinates.
/// Returns `None` rather than partial coordinates if either is missing or
/// not a number.
///
/// ```rust
/// use swatch_world::{RegionCoord, parse_filename};
/// assert_eq!(parse_filename("r.1.-2.mca"), Some(RegionCoord::new(1, -2)));
/// assert_eq!(parse_filename("r.1.mca"), None);
/// assert_eq!(parse_filename("r.a.0.mca"), None);
/// ```
pub fn parse_filename(name: &str) -> Option<RegionCoord> {
    let mut segments = name.splitn(4, '.');
    let _prefix = segments.next()?;
    let x = segments.next()?;
    let z = segments.next()?;
    // The remainder (the extension) only has to exist.
    segments.next()?;
    Some(RegionCoord::new(x.parse().ok()?, z.parse().ok()?))
}
