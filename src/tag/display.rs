use crate::tag::{CompoundTag, ListTag, NamedTag, Tag};
use std::fmt::{Display, Formatter, Result};

const INDENT: &str = "  ";

fn write_indent(f: &mut Formatter<'_>, depth: usize) -> Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }

    Ok(())
}

fn write_tag(f: &mut Formatter<'_>, name: Option<&str>, tag: &Tag, depth: usize) -> Result {
    write_indent(f, depth)?;
    write!(f, "{}", tag.kind())?;

    if let Some(name) = name {
        write!(f, "(\"{}\")", name)?;
    }

    match tag {
        Tag::Byte(value) => write!(f, ": {}", value),
        Tag::Short(value) => write!(f, ": {}", value),
        Tag::Int(value) => write!(f, ": {}", value),
        Tag::Long(value) => write!(f, ": {}", value),
        Tag::Float(value) => write!(f, ": {}", value),
        Tag::Double(value) => write!(f, ": {}", value),
        Tag::ByteArray(values) => write!(f, ": [{} bytes]", values.len()),
        Tag::String(value) => write!(f, ": {}", value),
        Tag::List(list_tag) => {
            write!(f, " ({}) {{", list_tag.len())?;
            write_children(f, list_tag.iter().map(|tag| (None, tag)), depth)
        }
        Tag::Compound(compound_tag) => {
            write!(f, " ({}) {{", compound_tag.len())?;
            write_children(
                f,
                compound_tag
                    .iter()
                    .map(|(name, tag)| (Some(name.as_str()), tag)),
                depth,
            )
        }
        Tag::IntArray(values) => write!(f, ": [{} ints]", values.len()),
    }
}

fn write_children<'a, I>(f: &mut Formatter<'_>, children: I, depth: usize) -> Result
where
    I: ExactSizeIterator<Item = (Option<&'a str>, &'a Tag)>,
{
    if children.len() > 0 {
        writeln!(f)?;

        for (name, tag) in children {
            write_tag(f, name, tag, depth + 1)?;
            writeln!(f)?;
        }

        write_indent(f, depth)?;
    }

    f.write_str("}")
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_tag(f, None, self, 0)
    }
}

impl Display for NamedTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_tag(f, Some(self.name.as_str()), &self.tag, 0)
    }
}

impl Display for ListTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ({}) {{", self.element_kind(), self.len())?;
        write_children(f, self.iter().map(|tag| (None, tag)), 0)
    }
}

impl Display for CompoundTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}) {{", self.len())?;
        write_children(f, self.iter().map(|(name, tag)| (Some(name.as_str()), tag)), 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::tag::{CompoundTag, ListTag, NamedTag, Tag, TagKind};

    #[test]
    fn test_display_scalar() {
        assert_eq!(NamedTag::new("xPos", 15).to_string(), "TAG_Int(\"xPos\"): 15");
    }

    #[test]
    fn test_display_nested() {
        let mut level = CompoundTag::new();
        level.insert_str("Status", "full");
        level.insert_list_tag(
            "Heights",
            ListTag::from_tags(TagKind::Short, vec![Tag::Short(64)]).unwrap(),
        );

        let expected = "TAG_Compound(\"Level\") (2) {\n\
                        \x20 TAG_List(\"Heights\") (1) {\n\
                        \x20   TAG_Short: 64\n\
                        \x20 }\n\
                        \x20 TAG_String(\"Status\"): full\n\
                        }";

        assert_eq!(NamedTag::new("Level", level).to_string(), expected);
    }

    #[test]
    fn test_display_empty_list() {
        assert_eq!(
            Tag::List(ListTag::new(TagKind::Int)).to_string(),
            "TAG_List (0) {}"
        );
    }
}
