//! Named binary tag model.
//!
//! A tag tree is owned top-down: lists and compounds own their children and
//! nothing points back up, so there is no sharing and no cycles.

pub mod compound;
pub mod decode;
mod display;
pub mod encode;
pub mod list;
mod modified_utf8;

pub use compound::CompoundTag;
pub use list::ListTag;

use std::fmt::Display;

/// Deepest nesting of lists and compounds the decoder accepts.
pub const MAX_DEPTH: usize = 512;

/// Wire kind of a tag.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum TagKind {
    /// Closes a compound, never carries a value.
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
}

impl TagKind {
    pub fn from_id(id: u8) -> Option<TagKind> {
        use TagKind::*;
        let kind = match id {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            _ => return None,
        };

        Some(kind)
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        use TagKind::*;
        match self {
            End => "TAG_End",
            Byte => "TAG_Byte",
            Short => "TAG_Short",
            Int => "TAG_Int",
            Long => "TAG_Long",
            Float => "TAG_Float",
            Double => "TAG_Double",
            ByteArray => "TAG_Byte_Array",
            String => "TAG_String",
            List => "TAG_List",
            Compound => "TAG_Compound",
            IntArray => "TAG_Int_Array",
        }
    }

    /// Fewest bytes a payload of this kind occupies on the wire.
    pub(crate) fn min_payload_len(self) -> usize {
        use TagKind::*;
        match self {
            End => 0,
            Byte | Compound => 1,
            Short | String => 2,
            Int | Float | ByteArray | IntArray => 4,
            List => 5,
            Long | Double => 8,
        }
    }
}

impl Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag value.
///
/// End is only a wire sentinel and has no value variant.
#[derive(Debug, Clone)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(ListTag),
    Compound(CompoundTag),
    IntArray(Vec<i32>),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::String(_) => TagKind::String,
            Tag::List(_) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
            Tag::IntArray(_) => TagKind::IntArray,
        }
    }
}

/// Floats compare by bit pattern, so every tag equals its own decoded copy.
impl PartialEq for Tag {
    fn eq(&self, other: &Tag) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        match (self, other) {
            (Tag::Byte(a), Tag::Byte(b)) => a == b,
            (Tag::Short(a), Tag::Short(b)) => a == b,
            (Tag::Int(a), Tag::Int(b)) => a == b,
            (Tag::Long(a), Tag::Long(b)) => a == b,
            (Tag::Float(a), Tag::Float(b)) => a.to_bits() == b.to_bits(),
            (Tag::Double(a), Tag::Double(b)) => a.to_bits() == b.to_bits(),
            (Tag::ByteArray(a), Tag::ByteArray(b)) => a == b,
            (Tag::String(a), Tag::String(b)) => a == b,
            (Tag::List(a), Tag::List(b)) => a == b,
            (Tag::Compound(a), Tag::Compound(b)) => a == b,
            (Tag::IntArray(a), Tag::IntArray(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Tag {}

impl From<i8> for Tag {
    fn from(value: i8) -> Self {
        Tag::Byte(value)
    }
}

impl From<i16> for Tag {
    fn from(value: i16) -> Self {
        Tag::Short(value)
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Tag::Int(value)
    }
}

impl From<i64> for Tag {
    fn from(value: i64) -> Self {
        Tag::Long(value)
    }
}

impl From<f32> for Tag {
    fn from(value: f32) -> Self {
        Tag::Float(value)
    }
}

impl From<f64> for Tag {
    fn from(value: f64) -> Self {
        Tag::Double(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_owned())
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::String(value)
    }
}

impl From<ListTag> for Tag {
    fn from(value: ListTag) -> Self {
        Tag::List(value)
    }
}

impl From<CompoundTag> for Tag {
    fn from(value: CompoundTag) -> Self {
        Tag::Compound(value)
    }
}

/// Tag in full form, carrying the name that list elements go without.
#[derive(Debug, Clone, Eq)]
pub struct NamedTag {
    pub name: String,
    pub tag: Tag,
}

impl NamedTag {
    pub fn new<N: Into<String>, T: Into<Tag>>(name: N, tag: T) -> Self {
        NamedTag {
            name: name.into(),
            tag: tag.into(),
        }
    }

    pub fn kind(&self) -> TagKind {
        self.tag.kind()
    }
}

impl PartialEq for NamedTag {
    fn eq(&self, other: &NamedTag) -> bool {
        std::ptr::eq(self, other) || (self.name == other.name && self.tag == other.tag)
    }
}
