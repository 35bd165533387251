use crate::error::CompoundTagError;
use crate::tag::{ListTag, Tag};
use std::collections::btree_map::{self, BTreeMap};

/// Mapping from names to tags.
///
/// Entries are kept ordered by name, which makes encoding deterministic.
/// Equality ignores the order the entries were inserted in.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CompoundTag {
    tags: BTreeMap<String, Tag>,
}

macro_rules! define_primitive_accessors {
    ($($variant:ident, $type:ty, $get:ident, $insert:ident;)*) => {
        $(
            pub fn $get<'a>(&self, name: &'a str) -> Result<$type, CompoundTagError<'a>> {
                match self.get_tag(name)? {
                    Tag::$variant(value) => Ok(*value),
                    tag => Err(CompoundTagError::TagWrongType {
                        name,
                        actual_kind: tag.kind(),
                    }),
                }
            }

            pub fn $insert<N: Into<String>>(&mut self, name: N, value: $type) {
                self.tags.insert(name.into(), Tag::$variant(value));
            }
        )*
    };
}

macro_rules! define_ref_accessors {
    ($($variant:ident, $type:ty, $get:ident;)*) => {
        $(
            pub fn $get<'a>(&self, name: &'a str) -> Result<&$type, CompoundTagError<'a>> {
                match self.get_tag(name)? {
                    Tag::$variant(value) => Ok(value),
                    tag => Err(CompoundTagError::TagWrongType {
                        name,
                        actual_kind: tag.kind(),
                    }),
                }
            }
        )*
    };
}

impl CompoundTag {
    pub fn new() -> Self {
        CompoundTag::default()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.get(name)
    }

    /// Inserts a child, returning the one previously stored under the name.
    pub fn insert<N: Into<String>, T: Into<Tag>>(&mut self, name: N, tag: T) -> Option<Tag> {
        self.tags.insert(name.into(), tag.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.tags.remove(name)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Tag> {
        self.tags.iter()
    }

    fn get_tag<'a>(&self, name: &'a str) -> Result<&Tag, CompoundTagError<'a>> {
        self.tags
            .get(name)
            .ok_or(CompoundTagError::TagNotFound { name })
    }

    define_primitive_accessors! {
        Byte, i8, get_i8, insert_i8;
        Short, i16, get_i16, insert_i16;
        Int, i32, get_i32, insert_i32;
        Long, i64, get_i64, insert_i64;
        Float, f32, get_f32, insert_f32;
        Double, f64, get_f64, insert_f64;
    }

    define_ref_accessors! {
        String, String, get_string;
        ByteArray, Vec<i8>, get_i8_vec;
        IntArray, Vec<i32>, get_i32_vec;
        List, ListTag, get_list_tag;
        Compound, CompoundTag, get_compound_tag;
    }

    pub fn get_str<'a>(&self, name: &'a str) -> Result<&str, CompoundTagError<'a>> {
        self.get_string(name).map(String::as_str)
    }

    pub fn insert_str<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.tags.insert(name.into(), Tag::String(value.into()));
    }

    pub fn insert_i8_vec<N: Into<String>>(&mut self, name: N, value: Vec<i8>) {
        self.tags.insert(name.into(), Tag::ByteArray(value));
    }

    pub fn insert_i32_vec<N: Into<String>>(&mut self, name: N, value: Vec<i32>) {
        self.tags.insert(name.into(), Tag::IntArray(value));
    }

    pub fn insert_list_tag<N: Into<String>>(&mut self, name: N, value: ListTag) {
        self.tags.insert(name.into(), Tag::List(value));
    }

    pub fn insert_compound_tag<N: Into<String>>(&mut self, name: N, value: CompoundTag) {
        self.tags.insert(name.into(), Tag::Compound(value));
    }
}

impl<'a> IntoIterator for &'a CompoundTag {
    type Item = (&'a String, &'a Tag);
    type IntoIter = btree_map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CompoundTagError;
    use crate::tag::{CompoundTag, ListTag, TagKind};

    #[test]
    fn test_typed_getters() {
        let mut compound = CompoundTag::new();
        compound.insert_i8("byte", -1);
        compound.insert_i64("long", 1 << 40);
        compound.insert_f32("float", 0.5);
        compound.insert_str("string", "stone");
        compound.insert_i32_vec("ints", vec![1, 2, 3]);
        compound.insert_list_tag("list", ListTag::new(TagKind::Short));

        assert_eq!(compound.get_i8("byte").unwrap(), -1);
        assert_eq!(compound.get_i64("long").unwrap(), 1 << 40);
        assert_eq!(compound.get_f32("float").unwrap(), 0.5);
        assert_eq!(compound.get_str("string").unwrap(), "stone");
        assert_eq!(compound.get_i32_vec("ints").unwrap(), &vec![1, 2, 3]);
        assert_eq!(
            compound.get_list_tag("list").unwrap().element_kind(),
            TagKind::Short
        );
    }

    #[test]
    fn test_get_missing() {
        let compound = CompoundTag::new();

        assert_eq!(
            compound.get_i32("xPos"),
            Err(CompoundTagError::TagNotFound { name: "xPos" })
        );
    }

    #[test]
    fn test_get_wrong_type() {
        let mut compound = CompoundTag::new();
        compound.insert_i16("xPos", 3);

        assert_eq!(
            compound.get_i32("xPos"),
            Err(CompoundTagError::TagWrongType {
                name: "xPos",
                actual_kind: TagKind::Short
            })
        );
    }

    #[test]
    fn test_insert_replaces() {
        let mut compound = CompoundTag::new();
        compound.insert_i32("xPos", 1);
        compound.insert_i32("xPos", 2);

        assert_eq!(compound.len(), 1);
        assert_eq!(compound.get_i32("xPos").unwrap(), 2);
    }
}
