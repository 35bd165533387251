//! Region file decoder and named binary tag model.
//!
//! ```no_run
//! use anvil_terrain::region::RegionReader;
//!
//! let mut region = RegionReader::open("world/region/r.0.0.mca").unwrap();
//!
//! for (position, error) in region.read() {
//!     eprintln!("Skipping chunk {}: {}", position, error);
//! }
//!
//! if region.is_filled(5, 5) {
//!     let blocks = region.blocks_at(5, 5);
//!     let heights = region.heights_at(5, 5);
//!     let biomes = region.biomes_at(5, 5);
//! }
//! ```

pub mod codec;
pub mod column;
pub mod error;
pub mod geometry;
pub mod position;
pub mod region;
pub mod tag;

pub use crate::error::{ChunkReadError, RegionOpenError, TagDecodeError};
pub use crate::position::{is_region_file, RegionChunkPosition, RegionPosition};
pub use crate::region::RegionReader;
pub use crate::tag::{CompoundTag, ListTag, NamedTag, Tag, TagKind};
