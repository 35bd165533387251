use crate::codec::ByteReader;
use crate::error::{ChunkReadError, RegionOpenError};
use crate::geometry::REGION_CHUNKS;
use crate::position::{is_region_file, RegionChunkPosition, RegionPosition};
use crate::region::container::{ChunkLocation, ChunkSlot, ChunkState, RegionContainer};
use crate::region::terrain;
use crate::region::{
    CompressionScheme, SeekExt, CHUNK_MAXIMUM_BYTES_LENGTH,
    CHUNK_MAXIMUM_DECOMPRESSED_BYTES_LENGTH, REGION_HEADER_BYTES_LENGTH, REGION_HEADER_SECTORS,
    REGION_SECTOR_BYTES_LENGTH,
};
use crate::tag::decode::read_compound_tag;
use crate::tag::CompoundTag;
use bitvec::prelude::*;
use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, warn};
use std::fmt::Display;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Decoder of one region file, a 32x32 group of chunks.
///
/// Chunks are decoded lazily on first query, or all at once with `read`.
pub struct RegionReader<S> {
    position: RegionPosition,
    /// Source in which region are stored.
    source: S,
    source_len: u64,
    container: RegionContainer,
    /// Used sectors for chunks data.
    used_sectors: BitVec,
}

impl RegionReader<File> {
    /// Opens a region file named `r.<x>.<z>.<ext>`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RegionOpenError> {
        let path = path.as_ref();
        let position = is_region_file(path).ok_or_else(|| RegionOpenError::InvalidFileName {
            path: path.to_path_buf(),
        })?;

        let file = File::open(path)?;

        Self::load(position, file)
    }
}

impl<S: Read + Seek> RegionReader<S> {
    pub fn load(position: RegionPosition, mut source: S) -> Result<Self, RegionOpenError> {
        let source_len = source.len()?;
        let container = Self::read_header(&mut source, source_len)?;

        let total_sectors = ((source_len + (REGION_SECTOR_BYTES_LENGTH as u64 - 1))
            / REGION_SECTOR_BYTES_LENGTH as u64) as usize;

        let used_sectors = used_sectors(position, total_sectors, &container);

        debug!(
            target: "anvil-terrain",
            "Region {} loaded with {} filled chunks in {} sectors",
            position,
            container.filled_count(),
            total_sectors
        );

        Ok(RegionReader {
            position,
            source,
            source_len,
            container,
            used_sectors,
        })
    }

    /// First 8KB of source are header of 1024 locations and 1024 timestamps.
    fn read_header(source: &mut S, source_len: u64) -> Result<RegionContainer, RegionOpenError> {
        let malformed = || RegionOpenError::MalformedHeader { length: source_len };

        if REGION_HEADER_BYTES_LENGTH > source_len {
            return Err(malformed());
        }

        let mut header = vec![0u8; REGION_HEADER_BYTES_LENGTH as usize];
        source.seek(SeekFrom::Start(0))?;
        source.read_exact(&mut header)?;

        let mut reader = ByteReader::<BigEndian>::new(&header);
        let mut entries = Vec::with_capacity(REGION_CHUNKS);

        for _ in 0..REGION_CHUNKS {
            entries.push(reader.read_u32().map_err(|_| malformed())?);
        }

        let mut container = RegionContainer::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let last_modified_timestamp = reader.read_u32().map_err(|_| malformed())?;
            let location = ChunkLocation::from_entry(entry);

            if location.is_empty() {
                continue;
            }

            container
                .set_slot(
                    RegionChunkPosition::from_slot_index(index),
                    ChunkSlot::new(location, last_modified_timestamp),
                )
                .map_err(|_| malformed())?;
        }

        Ok(container)
    }

    /// Decodes every pending chunk, returning the ones which failed.
    ///
    /// A failed chunk never stops the others from being read.
    pub fn read(&mut self) -> Vec<(RegionChunkPosition, ChunkReadError)> {
        let pending: Vec<_> = self
            .container
            .iter_filled()
            .filter(|(_, slot)| matches!(slot.state, ChunkState::Pending))
            .map(|(position, _)| position)
            .collect();

        let mut failures = Vec::new();

        for position in pending {
            if let Err(chunk_read_error) = self.materialize(position) {
                failures.push((position, chunk_read_error));
            }
        }

        failures
    }

    /// Returns the decoded root of a chunk, decoding it when needed.
    pub fn chunk(&mut self, position: RegionChunkPosition) -> Result<&CompoundTag, ChunkReadError> {
        self.materialize(position)?;

        self.container
            .slot(position)
            .and_then(ChunkSlot::root)
            .ok_or(ChunkReadError::ChunkNotFound { position })
    }

    /// Block ids in (y, z, x) order, empty when the chunk has none.
    pub fn blocks_at(&mut self, chunk_x: i32, chunk_z: i32) -> Vec<i32> {
        self.terrain_at(chunk_x, chunk_z, terrain::BLOCKS, terrain::blocks)
    }

    /// Height map in (z, x) order, empty when the chunk has none.
    pub fn heights_at(&mut self, chunk_x: i32, chunk_z: i32) -> Vec<i32> {
        self.terrain_at(chunk_x, chunk_z, terrain::HEIGHT_MAP, terrain::heights)
    }

    /// Biome ids in (z, x) order, empty when the chunk has none.
    pub fn biomes_at(&mut self, chunk_x: i32, chunk_z: i32) -> Vec<u8> {
        self.terrain_at(chunk_x, chunk_z, terrain::BIOMES, terrain::biomes)
    }

    fn terrain_at<T>(
        &mut self,
        chunk_x: i32,
        chunk_z: i32,
        name: &str,
        extract: fn(&CompoundTag) -> Option<Vec<T>>,
    ) -> Vec<T> {
        let position = match RegionChunkPosition::checked(chunk_x, chunk_z) {
            Some(position) => position,
            None => return Vec::new(),
        };

        if !self.container.is_filled(chunk_x, chunk_z) {
            return Vec::new();
        }

        let region_position = self.position;

        match self.chunk(position) {
            Ok(root) => extract(root).unwrap_or_else(|| {
                debug!(
                    target: "anvil-terrain",
                    "Region {} chunk {} has no usable {}",
                    region_position,
                    position,
                    name
                );

                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    /// Decodes a pending chunk into its slot.
    ///
    /// On failure the slot is marked failed and keeps no partial tree.
    fn materialize(&mut self, position: RegionChunkPosition) -> Result<(), ChunkReadError> {
        let location = match self.container.slot(position) {
            None => return Err(ChunkReadError::ChunkNotFound { position }),
            Some(slot) => match &slot.state {
                ChunkState::Loaded(_) => return Ok(()),
                ChunkState::Failed => return Err(ChunkReadError::ChunkUnusable { position }),
                ChunkState::Pending => slot.location,
            },
        };

        let result = self.read_chunk(location);
        let region_position = self.position;

        let slot = match self.container.slot_mut(position) {
            Some(slot) => slot,
            None => return Err(ChunkReadError::ChunkNotFound { position }),
        };

        match result {
            Ok((payload_length, root)) => {
                debug!(
                    target: "anvil-terrain",
                    "Region {} chunk {} decoded from {} bytes",
                    region_position,
                    position,
                    payload_length
                );

                slot.payload_length = Some(payload_length);
                slot.state = ChunkState::Loaded(root);

                Ok(())
            }
            Err(chunk_read_error) => {
                warn!(
                    target: "anvil-terrain",
                    "Region {} chunk {} is unusable: {}",
                    region_position,
                    position,
                    chunk_read_error
                );

                slot.state = ChunkState::Failed;

                Err(chunk_read_error)
            }
        }
    }

    /// Reads, decompresses and decodes the chunk payload at a location.
    fn read_chunk(&mut self, location: ChunkLocation) -> Result<(u32, CompoundTag), ChunkReadError> {
        if location.start_sector_index < REGION_HEADER_SECTORS {
            return Err(ChunkReadError::SectorOutOfBounds {
                sector: location.start_sector_index,
            });
        }

        let seek_offset = location.start_sector_index as u64 * REGION_SECTOR_BYTES_LENGTH as u64;
        let available = self.source_len.saturating_sub(seek_offset);

        // 4 bytes for data length.
        if available < 4 {
            return Err(ChunkReadError::Truncated {
                needed: 4,
                available,
            });
        }

        // Length field itself occupies the first 4 bytes of the sectors.
        let maximum_length = (location.sectors as u32 * REGION_SECTOR_BYTES_LENGTH)
            .min(CHUNK_MAXIMUM_BYTES_LENGTH)
            .saturating_sub(4);

        self.source.seek(SeekFrom::Start(seek_offset))?;
        let length = self.source.read_u32::<BigEndian>()?;

        if length == 0 {
            return Err(ChunkReadError::EmptyPayload);
        }

        if length > maximum_length {
            return Err(ChunkReadError::LengthExceedsMaximum {
                length,
                maximum_length,
            });
        }

        let needed = 4 + length as u64;

        if needed > available {
            return Err(ChunkReadError::Truncated { needed, available });
        }

        let compression_scheme = self.source.read_u8()?;
        let scheme = CompressionScheme::from_id(compression_scheme)
            .ok_or(ChunkReadError::UnsupportedCompressionScheme { compression_scheme })?;

        let mut compressed_buffer = vec![0u8; (length - 1) as usize];
        self.source.read_exact(&mut compressed_buffer)?;

        let buffer = scheme
            .decompress(&compressed_buffer, CHUNK_MAXIMUM_DECOMPRESSED_BYTES_LENGTH)
            .map_err(|io_error| ChunkReadError::DecompressionFailure { io_error })?;

        Ok((length, read_compound_tag(&buffer)?))
    }
}

impl<S> RegionReader<S> {
    pub fn position(&self) -> RegionPosition {
        self.position
    }

    pub fn region_x(&self) -> i32 {
        self.position.x
    }

    pub fn region_z(&self) -> i32 {
        self.position.z
    }

    /// Coordinates outside of the region are never filled.
    pub fn is_filled(&self, chunk_x: i32, chunk_z: i32) -> bool {
        self.container.is_filled(chunk_x, chunk_z)
    }

    pub fn slot_at(&self, chunk_x: i32, chunk_z: i32) -> Option<&ChunkSlot> {
        self.container.slot_at(chunk_x, chunk_z)
    }

    /// Last modification time in seconds of a filled chunk.
    pub fn timestamp_at(&self, chunk_x: i32, chunk_z: i32) -> Option<u32> {
        self.slot_at(chunk_x, chunk_z)
            .map(|slot| slot.last_modified_timestamp)
    }

    pub fn filled_count(&self) -> usize {
        self.container.filled_count()
    }

    pub fn container(&self) -> &RegionContainer {
        &self.container
    }

    pub fn used_sectors(&self) -> &BitSlice {
        &self.used_sectors
    }
}

impl<S> Display for RegionReader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Region {} ({} chunks filled, {} sectors)",
            self.position,
            self.container.filled_count(),
            self.used_sectors.len()
        )
    }
}

/// Calculates used sectors, warning about chunks sharing sectors.
fn used_sectors(
    region_position: RegionPosition,
    total_sectors: usize,
    container: &RegionContainer,
) -> BitVec {
    // First two sectors are used to store header.
    let header_sectors = REGION_HEADER_SECTORS as usize;
    let mut used_sectors = bitvec![0; total_sectors.max(header_sectors)];

    for index in 0..header_sectors {
        used_sectors.set(index, true);
    }

    for (position, slot) in container.iter_slots() {
        let start_index = slot.location.start_sector_index as usize;
        let end_index = start_index + slot.location.sectors as usize;

        if start_index < header_sectors {
            warn!(
                target: "anvil-terrain",
                "Region {} chunk {} starts inside header at sector {}",
                region_position,
                position,
                start_index
            );

            continue;
        }

        if end_index > used_sectors.len() {
            warn!(
                target: "anvil-terrain",
                "Region {} chunk {} sectors {}..{} exceed source of {} sectors",
                region_position,
                position,
                start_index,
                end_index,
                used_sectors.len()
            );
        }

        let mut overlaps = false;

        for index in start_index..end_index.min(used_sectors.len()) {
            overlaps |= used_sectors[index];
            used_sectors.set(index, true);
        }

        if overlaps {
            warn!(
                target: "anvil-terrain",
                "Region {} chunk {} sectors {}..{} overlap another chunk",
                region_position,
                position,
                start_index,
                end_index
            );
        }
    }

    used_sectors
}
