//! Region file discovery for world save directories.
//!
//! A world keeps its terrain in `region/r.<x>.<z>.mca` files, each covering
//! 32×32 chunks. This crate only locates those files and works out how much
//! of the grid they cover; reading them is left to the caller.

pub mod error;
mod extent;
mod region;
mod world;

pub use crate::extent::Extent;
pub use crate::region::{BLOCKS_PER_REGION, RegionCoord, parse_filename};
pub use crate::world::{REGION_DIR, World};
