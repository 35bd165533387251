//! Encoding of tags to their binary form, mirroring [`crate::tag::decode`].

use crate::codec::ByteWriter;
use crate::error::CodecError;
use crate::tag::modified_utf8;
use crate::tag::{CompoundTag, ListTag, NamedTag, Tag, TagKind};
use byteorder::{BigEndian, ByteOrder};

/// Writes one full-form tag.
pub fn write_named_tag<B: ByteOrder>(
    writer: &mut ByteWriter<B>,
    named_tag: &NamedTag,
) -> Result<(), CodecError> {
    write_tag(writer, Some(named_tag.name.as_str()), &named_tag.tag)
}

/// Writes a tag in full form when it has a name, or in list element form
/// (payload only) when `name` is `None`.
pub fn write_tag<B: ByteOrder>(
    writer: &mut ByteWriter<B>,
    name: Option<&str>,
    tag: &Tag,
) -> Result<(), CodecError> {
    if let Some(name) = name {
        writer.write_u8(tag.kind().id());
        writer.write_string_bytes(&modified_utf8::encode(name))?;
    }

    match tag {
        Tag::Byte(value) => writer.write_i8(*value),
        Tag::Short(value) => writer.write_i16(*value),
        Tag::Int(value) => writer.write_i32(*value),
        Tag::Long(value) => writer.write_i64(*value),
        Tag::Float(value) => writer.write_f32(*value),
        Tag::Double(value) => writer.write_f64(*value),
        Tag::ByteArray(values) => {
            writer.write_array_length(values.len())?;

            for value in values {
                writer.write_i8(*value);
            }
        }
        Tag::String(value) => writer.write_string_bytes(&modified_utf8::encode(value))?,
        Tag::List(list_tag) => write_list_payload(writer, list_tag)?,
        Tag::Compound(compound_tag) => write_compound_payload(writer, compound_tag)?,
        Tag::IntArray(values) => {
            writer.write_array_length(values.len())?;

            for value in values {
                writer.write_i32(*value);
            }
        }
    }

    Ok(())
}

/// Encodes a root compound tag under `name`.
pub fn write_compound_tag(name: &str, compound_tag: &CompoundTag) -> Result<Vec<u8>, CodecError> {
    let mut writer = ByteWriter::<BigEndian>::new();

    writer.write_u8(TagKind::Compound.id());
    writer.write_string_bytes(&modified_utf8::encode(name))?;
    write_compound_payload(&mut writer, compound_tag)?;

    Ok(writer.into_bytes())
}

fn write_list_payload<B: ByteOrder>(
    writer: &mut ByteWriter<B>,
    list_tag: &ListTag,
) -> Result<(), CodecError> {
    writer.write_u8(list_tag.element_kind().id());
    writer.write_array_length(list_tag.len())?;

    for tag in list_tag {
        write_tag(writer, None, tag)?;
    }

    Ok(())
}

fn write_compound_payload<B: ByteOrder>(
    writer: &mut ByteWriter<B>,
    compound_tag: &CompoundTag,
) -> Result<(), CodecError> {
    for (name, tag) in compound_tag {
        write_tag(writer, Some(name.as_str()), tag)?;
    }

    writer.write_u8(TagKind::End.id());

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::codec::{ByteReader, ByteWriter, MAX_STRING_LENGTH};
    use crate::error::CodecError;
    use crate::tag::decode::{read_compound_tag, read_named_tag};
    use crate::tag::encode::{write_compound_tag, write_named_tag};
    use crate::tag::{CompoundTag, ListTag, NamedTag, Tag, TagKind};
    use byteorder::BigEndian;

    fn encode(named_tag: &NamedTag) -> Vec<u8> {
        let mut writer = ByteWriter::<BigEndian>::new();
        write_named_tag(&mut writer, named_tag).unwrap();

        writer.into_bytes()
    }

    fn round_trip(named_tag: &NamedTag) -> NamedTag {
        let bytes = encode(named_tag);
        let mut reader = ByteReader::<BigEndian>::new(&bytes);
        let decoded = read_named_tag(&mut reader).unwrap().unwrap();

        assert!(reader.is_empty());

        decoded
    }

    #[test]
    fn test_round_trip_scalars() {
        let tags = vec![
            NamedTag::new("byte", i8::MIN),
            NamedTag::new("short", -300i16),
            NamedTag::new("int", i32::MAX),
            NamedTag::new("long", -1i64 << 50),
            NamedTag::new("float", 3.25f32),
            NamedTag::new("double", f64::MIN_POSITIVE),
            NamedTag::new("string", "minecraft:stone"),
            NamedTag::new("", ""),
        ];

        for named_tag in &tags {
            assert_eq!(&round_trip(named_tag), named_tag);
        }
    }

    #[test]
    fn test_round_trip_arrays() {
        let bytes = NamedTag::new("Blocks", Tag::ByteArray((-128..=127).collect()));
        let ints = NamedTag::new("HeightMap", Tag::IntArray(vec![64, -1, i32::MIN]));
        let empty = NamedTag::new("Empty", Tag::IntArray(Vec::new()));

        assert_eq!(round_trip(&bytes), bytes);
        assert_eq!(round_trip(&ints), ints);
        assert_eq!(round_trip(&empty), empty);
    }

    #[test]
    fn test_round_trip_nested() {
        let mut section = CompoundTag::new();
        section.insert_i8("Y", 3);
        section.insert_i8_vec("Blocks", vec![1; 16]);

        let mut sections = ListTag::new(TagKind::Compound);
        sections.push_back(Tag::Compound(section.clone())).unwrap();
        sections.push_back(Tag::Compound(section)).unwrap();

        let mut nested_lists = ListTag::new(TagKind::List);
        nested_lists
            .push_back(Tag::List(
                ListTag::from_tags(TagKind::Double, vec![Tag::Double(0.5)]).unwrap(),
            ))
            .unwrap();
        nested_lists
            .push_back(Tag::List(ListTag::new(TagKind::String)))
            .unwrap();

        let mut level = CompoundTag::new();
        level.insert_i32("xPos", -7);
        level.insert_list_tag("Sections", sections);
        level.insert_list_tag("Nested", nested_lists);
        level.insert_compound_tag("Empty", CompoundTag::new());

        let mut root = CompoundTag::new();
        root.insert_compound_tag("Level", level);

        let named_tag = NamedTag::new("", root);

        assert_eq!(round_trip(&named_tag), named_tag);
    }

    #[test]
    fn test_empty_list_wire_form() {
        let mut writer = ByteWriter::<BigEndian>::new();
        crate::tag::encode::write_tag(&mut writer, None, &Tag::List(ListTag::new(TagKind::Int)))
            .unwrap();

        assert_eq!(writer.as_bytes(), &[3, 0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_list_round_trip() {
        let named_tag = NamedTag::new("list", ListTag::new(TagKind::Int));

        assert_eq!(encode(&named_tag), vec![9, 0, 4, b'l', b'i', b's', b't', 3, 0, 0, 0, 0]);
        assert_eq!(round_trip(&named_tag), named_tag);
    }

    #[test]
    fn test_list_elements_have_no_header() {
        let list_tag =
            ListTag::from_tags(TagKind::Short, vec![Tag::Short(1), Tag::Short(2)]).unwrap();
        let bytes = encode(&NamedTag::new("", list_tag));

        assert_eq!(bytes, vec![9, 0, 0, 2, 0, 0, 0, 2, 0, 1, 0, 2]);
    }

    #[test]
    fn test_string_maximum_length_round_trip() {
        let value = "a".repeat(MAX_STRING_LENGTH);
        let named_tag = NamedTag::new("s", value.as_str());

        assert_eq!(round_trip(&named_tag), named_tag);
    }

    #[test]
    fn test_string_overflow() {
        let named_tag = NamedTag::new("s", "a".repeat(MAX_STRING_LENGTH + 1));
        let mut writer = ByteWriter::<BigEndian>::new();

        assert_eq!(
            write_named_tag(&mut writer, &named_tag),
            Err(CodecError::Overflow {
                length: MAX_STRING_LENGTH + 1,
                maximum: MAX_STRING_LENGTH
            })
        );
    }

    #[test]
    fn test_name_overflow() {
        let named_tag = NamedTag::new("n".repeat(MAX_STRING_LENGTH + 1), 1);
        let mut writer = ByteWriter::<BigEndian>::new();

        assert!(write_named_tag(&mut writer, &named_tag).is_err());
    }

    #[test]
    fn test_compound_round_trip() {
        let mut compound_tag = CompoundTag::new();
        compound_tag.insert_str("Status", "full");
        compound_tag.insert_i64("LastUpdate", 1_570_215_508);

        let bytes = write_compound_tag("root", &compound_tag).unwrap();

        assert_eq!(read_compound_tag(&bytes).unwrap(), compound_tag);
    }

    #[test]
    fn test_string_modified_utf8_wire_form() {
        let named_tag = NamedTag::new("\0", "\u{1F600}");

        assert_eq!(
            encode(&named_tag),
            vec![8, 0, 2, 0xC0, 0x80, 0, 6, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]
        );
        assert_eq!(round_trip(&named_tag), named_tag);
    }

    #[test]
    fn test_supplementary_names_round_trip() {
        let mut compound_tag = CompoundTag::new();
        compound_tag.insert_i8("\u{1F600}", 5);
        compound_tag.insert_i8("\u{1F601}", 6);

        let bytes = write_compound_tag("", &compound_tag).unwrap();

        assert_eq!(read_compound_tag(&bytes).unwrap(), compound_tag);
    }
}
