//! Region file container and decoder.
//!
//! First 8KB of a region are two tables of 1024 big-endian entries ordered
//! by (z, x): chunk locations (3 bytes sector offset, 1 byte sector count)
//! and last modification timestamps. Chunk data follows in 4KB sectors, each
//! chunk prefixed by its length and compression scheme.

mod compression;
mod container;
mod reader;
mod terrain;

pub use compression::CompressionScheme;
pub use container::{ChunkLocation, ChunkSlot, ChunkState, RegionContainer};
pub use reader::RegionReader;

use crate::geometry::{CHUNK_BLOCKS, REGION_CHUNKS};
use std::io;
use std::io::{Seek, SeekFrom};

/// Region sector length in bytes.
pub const REGION_SECTOR_BYTES_LENGTH: u32 = 4096;
/// Amount of sectors occupied by the header.
pub const REGION_HEADER_SECTORS: u32 = 2;
/// Region header length in bytes.
pub const REGION_HEADER_BYTES_LENGTH: u64 = 2 * 4 * REGION_CHUNKS as u64;
/// Maximum chunk length in bytes.
pub const CHUNK_MAXIMUM_BYTES_LENGTH: u32 = REGION_SECTOR_BYTES_LENGTH * 256;
/// Maximum decompressed chunk length in bytes, 256 bytes for every block.
pub const CHUNK_MAXIMUM_DECOMPRESSED_BYTES_LENGTH: u64 = 256 * CHUNK_BLOCKS as u64;

/// Gzip compression type value.
pub const GZIP_COMPRESSION_TYPE: u8 = 1;
/// Zlib compression type value.
pub const ZLIB_COMPRESSION_TYPE: u8 = 2;

/// Trait adds additional helper methods for `Seek`.
trait SeekExt {
    fn len(&mut self) -> Result<u64, io::Error>;
}

impl<S: Seek> SeekExt for S {
    fn len(&mut self) -> Result<u64, io::Error> {
        let old_pos = self.seek(SeekFrom::Current(0))?;
        let len = self.seek(SeekFrom::End(0))?;

        if old_pos != len {
            self.seek(SeekFrom::Start(old_pos))?;
        }

        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use crate::region::{SeekExt, REGION_HEADER_BYTES_LENGTH, REGION_SECTOR_BYTES_LENGTH};
    use std::io::{Cursor, Seek, SeekFrom};

    #[test]
    fn test_header_spans_two_sectors() {
        assert_eq!(REGION_HEADER_BYTES_LENGTH, 8192);
        assert_eq!(
            REGION_HEADER_BYTES_LENGTH,
            2 * REGION_SECTOR_BYTES_LENGTH as u64
        );
    }

    #[test]
    fn test_len_keeps_position() {
        let mut cursor = Cursor::new(vec![1, 2, 3, 4, 5]);
        cursor.seek(SeekFrom::Start(2)).unwrap();

        assert_eq!(cursor.len().unwrap(), 5);
        assert_eq!(cursor.position(), 2);
    }
}
