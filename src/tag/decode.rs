//! Decoding of tags from their binary form.
//!
//! Full-form tags carry a kind byte and a name before the payload. List
//! elements are payloads only, their kind is declared once by the list.

use crate::codec::ByteReader;
use crate::error::TagDecodeError;
use crate::tag::modified_utf8;
use crate::tag::{CompoundTag, ListTag, NamedTag, Tag, TagKind, MAX_DEPTH};
use byteorder::ByteOrder;
use log::debug;

/// Reads one full-form tag.
///
/// Returns `None` when the tag is an end tag.
pub fn read_named_tag<B: ByteOrder>(
    reader: &mut ByteReader<'_, B>,
) -> Result<Option<NamedTag>, TagDecodeError> {
    read_named_tag_at(reader, 0)
}

/// Reads bytes holding a single root compound tag, dropping the root name.
pub fn read_compound_tag(bytes: &[u8]) -> Result<CompoundTag, TagDecodeError> {
    let mut reader = ByteReader::<byteorder::BigEndian>::new(bytes);

    let named_tag = match read_named_tag(&mut reader)? {
        Some(named_tag) => named_tag,
        None => {
            return Err(TagDecodeError::RootNotCompound {
                kind: TagKind::End,
            })
        }
    };

    if !reader.is_empty() {
        debug!(
            target: "anvil-terrain",
            "Ignoring {} trailing bytes after root compound", reader.remaining()
        );
    }

    match named_tag.tag {
        Tag::Compound(compound_tag) => Ok(compound_tag),
        tag => Err(TagDecodeError::RootNotCompound { kind: tag.kind() }),
    }
}

fn read_named_tag_at<B: ByteOrder>(
    reader: &mut ByteReader<'_, B>,
    depth: usize,
) -> Result<Option<NamedTag>, TagDecodeError> {
    let kind = read_kind(reader)?;

    if kind == TagKind::End {
        return Ok(None);
    }

    let name = read_string(reader)?;
    let tag = read_payload(reader, kind, depth)?;

    Ok(Some(NamedTag { name, tag }))
}

fn read_kind<B: ByteOrder>(reader: &mut ByteReader<'_, B>) -> Result<TagKind, TagDecodeError> {
    let id = reader.read_u8()?;

    TagKind::from_id(id).ok_or(TagDecodeError::UnknownTagKind { kind: id })
}

fn read_string<B: ByteOrder>(reader: &mut ByteReader<'_, B>) -> Result<String, TagDecodeError> {
    let bytes = reader.read_string_bytes()?;

    match modified_utf8::decode(bytes) {
        Some(value) => Ok(value.into_owned()),
        None => Err(TagDecodeError::InvalidString {
            length: bytes.len(),
        }),
    }
}

/// Reads a signed element count and checks it against the remaining bytes.
fn read_length<B: ByteOrder>(
    reader: &mut ByteReader<'_, B>,
    element_len: usize,
) -> Result<usize, TagDecodeError> {
    let length = reader.read_i32()?;

    if length < 0 {
        return Err(TagDecodeError::NegativeLength { length });
    }

    let remaining = reader.remaining();

    if (length as usize).saturating_mul(element_len) > remaining {
        return Err(TagDecodeError::LengthExceedsRemaining { length, remaining });
    }

    Ok(length as usize)
}

fn read_payload<B: ByteOrder>(
    reader: &mut ByteReader<'_, B>,
    kind: TagKind,
    depth: usize,
) -> Result<Tag, TagDecodeError> {
    let tag = match kind {
        TagKind::End => return Err(TagDecodeError::EndTagInList { count: 1 }),
        TagKind::Byte => Tag::Byte(reader.read_i8()?),
        TagKind::Short => Tag::Short(reader.read_i16()?),
        TagKind::Int => Tag::Int(reader.read_i32()?),
        TagKind::Long => Tag::Long(reader.read_i64()?),
        TagKind::Float => Tag::Float(reader.read_f32()?),
        TagKind::Double => Tag::Double(reader.read_f64()?),
        TagKind::ByteArray => {
            let length = read_length(reader, 1)?;
            let bytes = reader.read_bytes(length)?;

            Tag::ByteArray(bytes.iter().map(|byte| *byte as i8).collect())
        }
        TagKind::String => Tag::String(read_string(reader)?),
        TagKind::List => Tag::List(read_list_payload(reader, depth + 1)?),
        TagKind::Compound => Tag::Compound(read_compound_payload(reader, depth + 1)?),
        TagKind::IntArray => {
            let length = read_length(reader, 4)?;
            let mut values = Vec::with_capacity(length);

            for _ in 0..length {
                values.push(reader.read_i32()?);
            }

            Tag::IntArray(values)
        }
    };

    Ok(tag)
}

fn check_depth(depth: usize) -> Result<(), TagDecodeError> {
    if depth > MAX_DEPTH {
        return Err(TagDecodeError::DepthLimitExceeded { depth: MAX_DEPTH });
    }

    Ok(())
}

fn read_list_payload<B: ByteOrder>(
    reader: &mut ByteReader<'_, B>,
    depth: usize,
) -> Result<ListTag, TagDecodeError> {
    check_depth(depth)?;

    let element_kind = read_kind(reader)?;
    let length = read_length(reader, element_kind.min_payload_len())?;

    if element_kind == TagKind::End && length > 0 {
        return Err(TagDecodeError::EndTagInList {
            count: length as i32,
        });
    }

    let mut tags = Vec::with_capacity(length);

    for _ in 0..length {
        tags.push(read_payload(reader, element_kind, depth)?);
    }

    Ok(ListTag::from_decoded(element_kind, tags))
}

fn read_compound_payload<B: ByteOrder>(
    reader: &mut ByteReader<'_, B>,
    depth: usize,
) -> Result<CompoundTag, TagDecodeError> {
    check_depth(depth)?;

    let mut compound_tag = CompoundTag::new();

    while let Some(NamedTag { name, tag }) = read_named_tag_at(reader, depth)? {
        compound_tag.insert(name, tag);
    }

    Ok(compound_tag)
}
