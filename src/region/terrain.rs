//! Terrain arrays of a decoded chunk root.
//!
//! Flat arrays may sit in the root or in its `Level` compound. Block ids may
//! instead be split into `Level.Sections`, one 16 block tall slice each.

use crate::geometry::{CHUNK_BLOCKS, CHUNK_COLUMNS, SECTIONS_PER_CHUNK, SECTION_BLOCKS};
use crate::tag::{CompoundTag, Tag};

const LEVEL: &str = "Level";
const SECTIONS: &str = "Sections";
const SECTION_Y: &str = "Y";
pub(crate) const BLOCKS: &str = "Blocks";
const ADD: &str = "Add";
pub(crate) const HEIGHT_MAP: &str = "HeightMap";
pub(crate) const BIOMES: &str = "Biomes";

/// Compound holding `name`, either the root or its `Level`.
fn holder<'a>(root: &'a CompoundTag, name: &str) -> Option<&'a CompoundTag> {
    if root.contains_key(name) {
        return Some(root);
    }

    root.get_compound_tag(LEVEL)
        .ok()
        .filter(|level| level.contains_key(name))
}

fn lookup<'a>(root: &'a CompoundTag, name: &str) -> Option<&'a Tag> {
    holder(root, name)?.get(name)
}

/// Block ids in (y, z, x) order.
pub(crate) fn blocks(root: &CompoundTag) -> Option<Vec<i32>> {
    let compound = match holder(root, BLOCKS) {
        Some(compound) => compound,
        None => return section_blocks(root),
    };

    match compound.get(BLOCKS) {
        Some(Tag::ByteArray(ids)) if ids.len() == CHUNK_BLOCKS => {
            // Add extends the Blocks of the same compound.
            let add = match compound.get(ADD) {
                Some(Tag::ByteArray(add)) if add.len() == CHUNK_BLOCKS / 2 => Some(add.as_slice()),
                _ => None,
            };

            Some(widen(ids, add))
        }
        Some(Tag::IntArray(ids)) if ids.len() == CHUNK_BLOCKS => Some(ids.clone()),
        _ => None,
    }
}

pub(crate) fn heights(root: &CompoundTag) -> Option<Vec<i32>> {
    match lookup(root, HEIGHT_MAP) {
        Some(Tag::IntArray(heights)) if heights.len() == CHUNK_COLUMNS => Some(heights.clone()),
        _ => None,
    }
}

pub(crate) fn biomes(root: &CompoundTag) -> Option<Vec<u8>> {
    match lookup(root, BIOMES) {
        Some(Tag::ByteArray(biomes)) if biomes.len() == CHUNK_COLUMNS => {
            Some(biomes.iter().map(|&biome| biome as u8).collect())
        }
        Some(Tag::IntArray(biomes)) if biomes.len() == CHUNK_COLUMNS => biomes
            .iter()
            .map(|&biome| u8::try_from(biome).ok())
            .collect(),
        _ => None,
    }
}

/// Stitches sections into one chunk sized array. Absent sections are air.
fn section_blocks(root: &CompoundTag) -> Option<Vec<i32>> {
    let sections = match lookup(root, SECTIONS) {
        Some(Tag::List(sections)) => sections,
        _ => return None,
    };

    let mut blocks = vec![0; CHUNK_BLOCKS];

    for tag in sections {
        let section = match tag {
            Tag::Compound(section) => section,
            _ => return None,
        };

        // Sections holding only light data.
        let ids = match section.get_i8_vec(BLOCKS) {
            Ok(ids) => ids,
            Err(_) => continue,
        };

        let y = section.get_i8(SECTION_Y).ok()?;

        if y < 0 || y as usize >= SECTIONS_PER_CHUNK || ids.len() != SECTION_BLOCKS {
            return None;
        }

        let add = section
            .get_i8_vec(ADD)
            .ok()
            .filter(|add| add.len() == SECTION_BLOCKS / 2)
            .map(|add| add.as_slice());

        let offset = y as usize * SECTION_BLOCKS;
        blocks[offset..offset + SECTION_BLOCKS].copy_from_slice(&widen(ids, add));
    }

    Some(blocks)
}

/// Reads ids as unsigned, adding the high nibble array when present.
fn widen(ids: &[i8], add: Option<&[i8]>) -> Vec<i32> {
    ids.iter()
        .enumerate()
        .map(|(index, &id)| {
            let id = id as u8 as i32;

            match add {
                Some(add) => id | nibble(add, index) << 8,
                None => id,
            }
        })
        .collect()
}

/// Even indexes are stored in the low half of a byte.
fn nibble(nibbles: &[i8], index: usize) -> i32 {
    let byte = nibbles[index / 2] as u8;

    if index % 2 == 0 {
        (byte & 0x0F) as i32
    } else {
        (byte >> 4) as i32
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{CHUNK_BLOCKS, CHUNK_COLUMNS, SECTION_BLOCKS};
    use crate::region::terrain::{biomes, blocks, heights};
    use crate::tag::{CompoundTag, ListTag, Tag, TagKind};

    fn section(y: i8, id: i8, add: Option<i8>) -> Tag {
        let mut section = CompoundTag::new();
        section.insert_i8("Y", y);
        section.insert_i8_vec("Blocks", vec![id; SECTION_BLOCKS]);

        if let Some(add) = add {
            section.insert_i8_vec("Add", vec![add; SECTION_BLOCKS / 2]);
        }

        Tag::Compound(section)
    }

    fn level_root(level: CompoundTag) -> CompoundTag {
        let mut root = CompoundTag::new();
        root.insert_compound_tag("Level", level);
        root
    }

    #[test]
    fn test_flat_blocks_unsigned() {
        let mut root = CompoundTag::new();
        root.insert_i8_vec("Blocks", vec![-1; CHUNK_BLOCKS]);

        let blocks = blocks(&root).unwrap();

        assert_eq!(blocks.len(), CHUNK_BLOCKS);
        assert!(blocks.iter().all(|&id| id == 255));
    }

    #[test]
    fn test_flat_blocks_with_add() {
        let mut level = CompoundTag::new();
        level.insert_i8_vec("Blocks", vec![7; CHUNK_BLOCKS]);
        level.insert_i8_vec("Add", vec![0x21; CHUNK_BLOCKS / 2]);

        let blocks = blocks(&level_root(level)).unwrap();

        assert_eq!(blocks[0], 0x107);
        assert_eq!(blocks[1], 0x207);
    }

    #[test]
    fn test_add_from_other_compound_ignored() {
        let mut level = CompoundTag::new();
        level.insert_i8_vec("Add", vec![0x21; CHUNK_BLOCKS / 2]);

        let mut root = level_root(level);
        root.insert_i8_vec("Blocks", vec![7; CHUNK_BLOCKS]);

        let blocks = blocks(&root).unwrap();

        assert_eq!(blocks[0], 7);
        assert_eq!(blocks[1], 7);
    }

    #[test]
    fn test_int_blocks_pass_through() {
        let ids: Vec<i32> = (0..CHUNK_BLOCKS as i32).collect();
        let mut root = CompoundTag::new();
        root.insert_i32_vec("Blocks", ids.clone());

        assert_eq!(blocks(&root), Some(ids));
    }

    #[test]
    fn test_wrong_sized_blocks() {
        let mut root = CompoundTag::new();
        root.insert_i8_vec("Blocks", vec![1; 100]);

        assert_eq!(blocks(&root), None);
    }

    #[test]
    fn test_sections_stitched() {
        let sections = ListTag::from_tags(
            TagKind::Compound,
            vec![section(0, 1, None), section(2, 3, Some(0x21))],
        )
        .unwrap();

        let mut level = CompoundTag::new();
        level.insert_list_tag("Sections", sections);

        let blocks = blocks(&level_root(level)).unwrap();

        assert_eq!(blocks.len(), CHUNK_BLOCKS);
        assert_eq!(blocks[0], 1);
        assert_eq!(blocks[SECTION_BLOCKS - 1], 1);
        // Missing section reads as air.
        assert_eq!(blocks[SECTION_BLOCKS], 0);
        assert_eq!(blocks[2 * SECTION_BLOCKS], 0x103);
        assert_eq!(blocks[2 * SECTION_BLOCKS + 1], 0x203);
        assert_eq!(blocks[CHUNK_BLOCKS - 1], 0);
    }

    #[test]
    fn test_section_out_of_range() {
        let sections = ListTag::from_tags(TagKind::Compound, vec![section(16, 1, None)]).unwrap();

        let mut level = CompoundTag::new();
        level.insert_list_tag("Sections", sections);

        assert_eq!(blocks(&level_root(level)), None);
    }

    #[test]
    fn test_heights_and_biomes() {
        let mut level = CompoundTag::new();
        level.insert_i32_vec("HeightMap", vec![64; CHUNK_COLUMNS]);
        level.insert_i8_vec("Biomes", vec![-127; CHUNK_COLUMNS]);
        let root = level_root(level);

        assert_eq!(heights(&root), Some(vec![64; CHUNK_COLUMNS]));
        assert_eq!(biomes(&root), Some(vec![129; CHUNK_COLUMNS]));
    }

    #[test]
    fn test_int_biomes() {
        let mut root = CompoundTag::new();
        root.insert_i32_vec("Biomes", vec![21; CHUNK_COLUMNS]);

        assert_eq!(biomes(&root), Some(vec![21; CHUNK_COLUMNS]));

        root.insert_i32_vec("Biomes", vec![256; CHUNK_COLUMNS]);

        assert_eq!(biomes(&root), None);
    }

    #[test]
    fn test_missing_arrays() {
        let root = CompoundTag::new();

        assert_eq!(blocks(&root), None);
        assert_eq!(heights(&root), None);
        assert_eq!(biomes(&root), None);
    }
}
