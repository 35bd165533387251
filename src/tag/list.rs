use crate::error::ListInsertError;
use crate::tag::{Tag, TagKind};

/// Ordered tags sharing one element kind.
///
/// Elements are stored without names and every insertion is checked against
/// the declared element kind.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ListTag {
    element_kind: TagKind,
    tags: Vec<Tag>,
}

impl ListTag {
    pub fn new(element_kind: TagKind) -> Self {
        ListTag {
            element_kind,
            tags: Vec::new(),
        }
    }

    /// Builds a list from tags, failing on the first tag of another kind.
    pub fn from_tags(element_kind: TagKind, tags: Vec<Tag>) -> Result<Self, ListInsertError> {
        if let Some(tag) = tags.iter().find(|tag| tag.kind() != element_kind) {
            return Err(ListInsertError::TypeMismatch {
                expected: element_kind,
                found: tag.kind(),
            });
        }

        Ok(ListTag { element_kind, tags })
    }

    /// Elements must all have been read as `element_kind`.
    pub(crate) fn from_decoded(element_kind: TagKind, tags: Vec<Tag>) -> Self {
        debug_assert!(tags.iter().all(|tag| tag.kind() == element_kind));

        ListTag { element_kind, tags }
    }

    pub fn element_kind(&self) -> TagKind {
        self.element_kind
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Inserts a tag at `index`, shifting later elements.
    pub fn insert(&mut self, index: usize, tag: Tag) -> Result<(), ListInsertError> {
        self.check_kind(&tag)?;

        if index > self.tags.len() {
            return Err(ListInsertError::IndexOutOfRange {
                index,
                len: self.tags.len(),
            });
        }

        self.tags.insert(index, tag);

        Ok(())
    }

    /// Appends a tag to the end of the list.
    pub fn push_back(&mut self, tag: Tag) -> Result<(), ListInsertError> {
        self.check_kind(&tag)?;
        self.tags.push(tag);

        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Tag> {
        if index >= self.tags.len() {
            return None;
        }

        Some(self.tags.remove(index))
    }

    fn check_kind(&self, tag: &Tag) -> Result<(), ListInsertError> {
        if tag.kind() != self.element_kind {
            return Err(ListInsertError::TypeMismatch {
                expected: self.element_kind,
                found: tag.kind(),
            });
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a ListTag {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
