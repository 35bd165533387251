//! Per-column search over decoded chunk arrays.

use crate::error::IndexOutOfRange;
use crate::geometry::{block_index, column_index, CHUNK_HEIGHT};

/// Block id of air.
pub const AIR: i32 = 0;

/// Topmost solid block of a column.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceBlock {
    pub id: i32,
    pub y: usize,
}

/// Finds the topmost block of a column which is neither air nor transparent.
///
/// The walk starts below the height map value, never above `max_height`, and
/// stops at the bottom of the chunk with `None`. Arrays shorter than the
/// chunk geometry are reported instead of being read out of range.
pub fn surface_block<F>(
    blocks: &[i32],
    heights: &[i32],
    block_x: i32,
    block_z: i32,
    max_height: usize,
    is_transparent: F,
) -> Result<Option<SurfaceBlock>, IndexOutOfRange>
where
    F: Fn(i32) -> bool,
{
    let column = column_index(block_x as i64, block_z as i64)?;
    let height = *heights.get(column).ok_or(IndexOutOfRange {
        axis: "height map",
        value: column as i64,
        bound: heights.len(),
    })?;

    // Height map holds the y above the highest block.
    if height <= 0 {
        return Ok(None);
    }

    let top = (height as usize - 1).min(max_height).min(CHUNK_HEIGHT - 1);

    for y in (0..=top).rev() {
        let index = block_index(block_x as i64, y as i64, block_z as i64)?;
        let id = *blocks.get(index).ok_or(IndexOutOfRange {
            axis: "blocks",
            value: index as i64,
            bound: blocks.len(),
        })?;

        if id != AIR && !is_transparent(id) {
            return Ok(Some(SurfaceBlock { id, y }));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use crate::column::{surface_block, SurfaceBlock};
    use crate::error::IndexOutOfRange;
    use crate::geometry::{block_index, CHUNK_BLOCKS, CHUNK_COLUMNS};

    const GLASS: i32 = 20;

    fn is_glass(id: i32) -> bool {
        id == GLASS
    }

    fn column(layers: &[(usize, i32)]) -> Vec<i32> {
        let mut blocks = vec![0; CHUNK_BLOCKS];

        for &(y, id) in layers {
            blocks[block_index(3, y as i64, 4).unwrap()] = id;
        }

        blocks
    }

    #[test]
    fn test_surface_block() {
        let blocks = column(&[(10, 1), (11, GLASS), (12, GLASS)]);
        let heights = vec![13; CHUNK_COLUMNS];

        assert_eq!(
            surface_block(&blocks, &heights, 3, 4, 255, is_glass),
            Ok(Some(SurfaceBlock { id: 1, y: 10 }))
        );
    }

    #[test]
    fn test_max_height_clamps_start() {
        let blocks = column(&[(10, 1), (60, 2)]);
        let heights = vec![61; CHUNK_COLUMNS];

        assert_eq!(
            surface_block(&blocks, &heights, 3, 4, 40, is_glass),
            Ok(Some(SurfaceBlock { id: 1, y: 10 }))
        );
    }

    #[test]
    fn test_height_above_chunk() {
        let blocks = column(&[(255, 7)]);
        let heights = vec![1000; CHUNK_COLUMNS];

        assert_eq!(
            surface_block(&blocks, &heights, 3, 4, usize::MAX, is_glass),
            Ok(Some(SurfaceBlock { id: 7, y: 255 }))
        );
    }

    #[test]
    fn test_only_air_and_transparent() {
        let blocks = column(&[(0, GLASS), (1, GLASS)]);
        let heights = vec![256; CHUNK_COLUMNS];

        assert_eq!(surface_block(&blocks, &heights, 3, 4, 255, is_glass), Ok(None));
    }

    #[test]
    fn test_empty_height() {
        let blocks = column(&[(0, 1)]);
        let heights = vec![0; CHUNK_COLUMNS];

        assert_eq!(surface_block(&blocks, &heights, 3, 4, 255, is_glass), Ok(None));
    }

    #[test]
    fn test_out_of_range() {
        let blocks = column(&[]);
        let heights = vec![10; CHUNK_COLUMNS];

        assert_eq!(
            surface_block(&blocks, &heights, 16, 0, 255, is_glass),
            Err(IndexOutOfRange {
                axis: "block x",
                value: 16,
                bound: 16
            })
        );
    }

    #[test]
    fn test_short_arrays() {
        let heights = vec![10; CHUNK_COLUMNS];

        assert_eq!(
            surface_block(&[], &heights, 0, 0, 255, is_glass),
            Err(IndexOutOfRange {
                axis: "blocks",
                value: 9 * 256,
                bound: 0
            })
        );

        assert!(surface_block(&column(&[]), &[], 0, 0, 255, is_glass).is_err());
    }
}
