use crate::error::IndexOutOfRange;
use crate::geometry::{chunk_slot_index, REGION_AXIS_CHUNKS, REGION_CHUNKS};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Position of a region among other regions of a world.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
pub struct RegionPosition {
    pub x: i32,
    pub z: i32,
}

impl RegionPosition {
    pub fn new(x: i32, z: i32) -> RegionPosition {
        RegionPosition { x, z }
    }

    pub fn from_chunk_position(chunk_x: i32, chunk_z: i32) -> RegionPosition {
        let x = chunk_x.div_euclid(REGION_AXIS_CHUNKS as i32);
        let z = chunk_z.div_euclid(REGION_AXIS_CHUNKS as i32);

        RegionPosition::new(x, z)
    }

    /// Region file name with the usual `mca` extension.
    pub fn filename(&self) -> String {
        format!("r.{}.{}.mca", self.x, self.z)
    }
}

impl Display for RegionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Position of a chunk inside its region.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
pub struct RegionChunkPosition {
    pub x: u8,
    pub z: u8,
}

impl RegionChunkPosition {
    pub fn new(x: u8, z: u8) -> RegionChunkPosition {
        debug_assert!(
            REGION_AXIS_CHUNKS > x as usize,
            "Region chunk x coordinate out of bounds"
        );
        debug_assert!(
            REGION_AXIS_CHUNKS > z as usize,
            "Region chunk z coordinate out of bounds"
        );

        RegionChunkPosition { x, z }
    }

    /// Returns `None` for coordinates outside of a region.
    pub fn checked(x: i32, z: i32) -> Option<RegionChunkPosition> {
        chunk_slot_index(x as i64, z as i64).ok()?;

        Some(RegionChunkPosition {
            x: x as u8,
            z: z as u8,
        })
    }

    pub fn from_chunk_position(chunk_x: i32, chunk_z: i32) -> RegionChunkPosition {
        let x = chunk_x.rem_euclid(REGION_AXIS_CHUNKS as i32) as u8;
        let z = chunk_z.rem_euclid(REGION_AXIS_CHUNKS as i32) as u8;

        RegionChunkPosition::new(x, z)
    }

    pub(crate) fn from_slot_index(index: usize) -> RegionChunkPosition {
        debug_assert!(REGION_CHUNKS > index, "Region slot index out of bounds");

        RegionChunkPosition::new(
            (index % REGION_AXIS_CHUNKS) as u8,
            (index / REGION_AXIS_CHUNKS) as u8,
        )
    }

    /// Index into region header tables.
    ///
    /// Fields are public, so a position built by hand may lie outside the region.
    pub(crate) fn slot_index(&self) -> Result<usize, IndexOutOfRange> {
        chunk_slot_index(self.x as i64, self.z as i64)
    }
}

impl Display for RegionChunkPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Parses region coordinates from a `r.<x>.<z>.<ext>` file name.
///
/// Returns `None` for any other name, so unrelated files can be skipped.
pub fn is_region_file<P: AsRef<Path>>(path: P) -> Option<RegionPosition> {
    let filename = path.as_ref().file_name()?.to_str()?;
    let parts: Vec<_> = filename.split('.').collect();

    let incorrect_format = parts.len() != 4 || parts[0] != "r" || parts[3].is_empty();

    if incorrect_format {
        return None;
    }

    Some(RegionPosition::new(
        i32::from_str(parts[1]).ok()?,
        i32::from_str(parts[2]).ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::position::{is_region_file, RegionChunkPosition, RegionPosition};
    use std::path::PathBuf;

    #[test]
    fn test_position_parse() {
        let mut path = PathBuf::new();
        path.set_file_name("r.-1.1.mca");

        assert_eq!(is_region_file(&path), Some(RegionPosition { x: -1, z: 1 }));
    }

    #[test]
    fn test_position_parse_with_directory_and_other_extension() {
        let path = PathBuf::from("world/region/r.12.-30.mcr");

        assert_eq!(is_region_file(&path), Some(RegionPosition::new(12, -30)));
    }

    #[test]
    fn test_position_parse_invalid_format() {
        assert_eq!(is_region_file("this is not a valid region.filename"), None);
        assert_eq!(is_region_file("r.1.mca"), None);
        assert_eq!(is_region_file("r.a.1.mca"), None);
        assert_eq!(is_region_file("r.1.1."), None);
        assert_eq!(is_region_file("c.1.1.mca"), None);
    }

    #[test]
    fn test_filename() {
        let position = RegionPosition::new(-2, 7);

        assert_eq!(is_region_file(position.filename()), Some(position));
    }

    #[test]
    fn test_from_chunk_position() {
        assert_eq!(
            RegionPosition::from_chunk_position(-1, 33),
            RegionPosition::new(-1, 1)
        );
        assert_eq!(
            RegionChunkPosition::from_chunk_position(-1, 33),
            RegionChunkPosition::new(31, 1)
        );
    }

    #[test]
    fn test_checked() {
        assert_eq!(
            RegionChunkPosition::checked(5, 31),
            Some(RegionChunkPosition::new(5, 31))
        );
        assert_eq!(RegionChunkPosition::checked(32, 0), None);
        assert_eq!(RegionChunkPosition::checked(0, -1), None);
    }

    #[test]
    fn test_slot_index() {
        for index in [0, 1, 31, 32, 165, 1023] {
            let position = RegionChunkPosition::from_slot_index(index);

            assert_eq!(position.slot_index(), Ok(index));
        }
    }

    #[test]
    fn test_slot_index_out_of_range() {
        let position = RegionChunkPosition { x: 40, z: 0 };

        assert!(position.slot_index().is_err());
    }
}
