//! Dimensions of regions and chunks.
//!
//! All index arithmetic in the crate goes through these constants and helpers.
//! Coordinates outside a dimension are reported, never wrapped or clamped.

use crate::error::IndexOutOfRange;

/// Chunks along one horizontal axis of a region.
pub const REGION_AXIS_CHUNKS: usize = 32;
/// Blocks along one horizontal axis of a chunk.
pub const CHUNK_AXIS_BLOCKS: usize = 16;
/// Blocks along the vertical axis of a chunk.
pub const CHUNK_HEIGHT: usize = 256;
/// Blocks along the vertical axis of a chunk section.
pub const SECTION_HEIGHT: usize = 16;

/// Amount of chunks in region.
pub const REGION_CHUNKS: usize = REGION_AXIS_CHUNKS * REGION_AXIS_CHUNKS;
/// Amount of block columns in chunk, the size of height map and biome arrays.
pub const CHUNK_COLUMNS: usize = CHUNK_AXIS_BLOCKS * CHUNK_AXIS_BLOCKS;
/// Amount of blocks in chunk.
pub const CHUNK_BLOCKS: usize = CHUNK_COLUMNS * CHUNK_HEIGHT;
/// Amount of blocks in chunk section.
pub const SECTION_BLOCKS: usize = CHUNK_COLUMNS * SECTION_HEIGHT;
/// Amount of sections stacked in chunk.
pub const SECTIONS_PER_CHUNK: usize = CHUNK_HEIGHT / SECTION_HEIGHT;

fn check_axis(axis: &'static str, value: i64, bound: usize) -> Result<usize, IndexOutOfRange> {
    if value < 0 || value >= bound as i64 {
        return Err(IndexOutOfRange { axis, value, bound });
    }

    Ok(value as usize)
}

/// Index of a chunk slot in region header tables, ordered by (z, x).
pub fn chunk_slot_index(chunk_x: i64, chunk_z: i64) -> Result<usize, IndexOutOfRange> {
    let x = check_axis("chunk x", chunk_x, REGION_AXIS_CHUNKS)?;
    let z = check_axis("chunk z", chunk_z, REGION_AXIS_CHUNKS)?;

    Ok(z * REGION_AXIS_CHUNKS + x)
}

/// Index of a block column in height map and biome arrays, ordered by (z, x).
pub fn column_index(block_x: i64, block_z: i64) -> Result<usize, IndexOutOfRange> {
    let x = check_axis("block x", block_x, CHUNK_AXIS_BLOCKS)?;
    let z = check_axis("block z", block_z, CHUNK_AXIS_BLOCKS)?;

    Ok(z * CHUNK_AXIS_BLOCKS + x)
}

/// Index of a block in chunk block array, ordered by (y, z, x).
pub fn block_index(block_x: i64, block_y: i64, block_z: i64) -> Result<usize, IndexOutOfRange> {
    let column = column_index(block_x, block_z)?;
    let y = check_axis("block y", block_y, CHUNK_HEIGHT)?;

    Ok(y * CHUNK_COLUMNS + column)
}
