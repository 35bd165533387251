use crate::error::IndexOutOfRange;
use crate::geometry::{chunk_slot_index, REGION_CHUNKS};
use crate::position::RegionChunkPosition;
use crate::tag::CompoundTag;

/// Chunk location entry from the region header.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct ChunkLocation {
    /// Sector index from which starts chunk data.
    pub start_sector_index: u32,
    /// Amount of sectors used to store chunk.
    pub sectors: u8,
}

impl ChunkLocation {
    pub fn new(start_sector_index: u32, sectors: u8) -> Self {
        ChunkLocation {
            start_sector_index,
            sectors,
        }
    }

    pub fn from_entry(entry: u32) -> Self {
        ChunkLocation::new(entry >> 8, (entry & 0xFF) as u8)
    }

    pub fn to_entry(&self) -> u32 {
        (self.start_sector_index << 8) | self.sectors as u32
    }

    /// Whole entry is zero, so the slot holds no chunk.
    pub fn is_empty(&self) -> bool {
        self.to_entry() == 0
    }
}

/// Materialization state of a filled slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkState {
    /// Payload was not read yet.
    Pending,
    /// Payload decoded to this root compound.
    Loaded(CompoundTag),
    /// Payload failed to decode; the slot reads as empty from now on.
    Failed,
}

/// Filled slot of a region.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkSlot {
    pub location: ChunkLocation,
    /// Last time in seconds when chunk was modified.
    pub last_modified_timestamp: u32,
    /// Payload length from the chunk prefix, known once the chunk was read.
    pub payload_length: Option<u32>,
    pub state: ChunkState,
}

impl ChunkSlot {
    pub fn new(location: ChunkLocation, last_modified_timestamp: u32) -> Self {
        ChunkSlot {
            location,
            last_modified_timestamp,
            payload_length: None,
            state: ChunkState::Pending,
        }
    }

    pub fn root(&self) -> Option<&CompoundTag> {
        match &self.state {
            ChunkState::Loaded(root) => Some(root),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.state == ChunkState::Failed
    }
}

/// 32x32 grid of chunk slots.
///
/// Pure data holder, populated by the region reader.
#[derive(Debug, Clone)]
pub struct RegionContainer {
    slots: Vec<Option<ChunkSlot>>,
}

impl Default for RegionContainer {
    fn default() -> Self {
        RegionContainer {
            slots: vec![None; REGION_CHUNKS],
        }
    }
}

impl RegionContainer {
    pub fn new() -> Self {
        RegionContainer::default()
    }

    /// Coordinates outside of the region are never filled.
    pub fn is_filled(&self, chunk_x: i32, chunk_z: i32) -> bool {
        match self.slot_at(chunk_x, chunk_z) {
            Some(slot) => !slot.is_failed(),
            None => false,
        }
    }

    pub fn slot_at(&self, chunk_x: i32, chunk_z: i32) -> Option<&ChunkSlot> {
        let index = chunk_slot_index(chunk_x as i64, chunk_z as i64).ok()?;

        self.slots[index].as_ref()
    }

    pub fn slot(&self, position: RegionChunkPosition) -> Option<&ChunkSlot> {
        let index = position.slot_index().ok()?;

        self.slots.get(index)?.as_ref()
    }

    pub(crate) fn slot_mut(&mut self, position: RegionChunkPosition) -> Option<&mut ChunkSlot> {
        let index = position.slot_index().ok()?;

        self.slots.get_mut(index)?.as_mut()
    }

    /// Stores a slot, an empty location clears it instead.
    pub fn set_slot(
        &mut self,
        position: RegionChunkPosition,
        slot: ChunkSlot,
    ) -> Result<(), IndexOutOfRange> {
        let index = position.slot_index()?;

        if slot.location.is_empty() {
            self.slots[index] = None;
        } else {
            self.slots[index] = Some(slot);
        }

        Ok(())
    }

    pub fn filled_count(&self) -> usize {
        self.iter_filled().count()
    }

    /// Filled slots in header order, skipping the failed ones.
    pub fn iter_filled(&self) -> impl Iterator<Item = (RegionChunkPosition, &ChunkSlot)> {
        self.iter_slots().filter(|(_, slot)| !slot.is_failed())
    }

    /// Every non-empty slot in header order, failed ones included.
    pub fn iter_slots(&self) -> impl Iterator<Item = (RegionChunkPosition, &ChunkSlot)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|slot| (RegionChunkPosition::from_slot_index(index), slot))
        })
    }
}
