//! Types that represent the retain, insert and delete operations within
//! Pluma.

use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

use super::attributes::AttributeMap;
use super::text::{utf16_len, utf16_slice};
use super::{Len, Slice};

/// Represents an operation that inserts a run of text with optional
/// attributes.
///
/// Its length is the number of UTF-16 code units in `insert`, which keeps
/// offsets interchangeable with the reference JavaScript implementation.
#[derive(Arbitrary, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertText {
    /// The text this operation inserts. Always non-empty in a normalised
    /// edit.
    pub insert: String,

    /// Optionally contains the attributes of the inserted text. `None` and
    /// an empty map are equivalent; construction collapses the latter to the
    /// former.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeMap>,
}

impl Len for InsertText {
    fn len(&self) -> usize {
        utf16_len(&self.insert)
    }
}

impl Slice for InsertText {
    fn slice(&self, offset: usize, len: usize) -> Self {
        InsertText {
            insert: utf16_slice(&self.insert, offset, offset + len),
            attributes: self.attributes.clone(),
        }
    }
}

/// Represents an operation that inserts a single embedded code point, e.g. a
/// marker the host editor renders as a non-text object.
///
/// A code always has length one and is atomic: slicing never divides it.
#[derive(Arbitrary, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertCode {
    /// The code to insert.
    pub insert: u32,

    /// Optionally contains the attributes of the inserted code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeMap>,
}

impl Len for InsertCode {
    fn len(&self) -> usize {
        1
    }
}

impl Slice for InsertCode {
    fn slice(&self, _offset: usize, _len: usize) -> Self {
        self.clone()
    }
}

/// Represents an operation that retains a run of the base document,
/// optionally updating its attributes.
///
/// A retained tombstone ([`AttributeValue::Null`](super::AttributeValue))
/// clears the named attribute from the retained characters.
#[derive(Arbitrary, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retain {
    /// The number of elements to retain.
    pub retain: usize,

    /// Optionally contains the attributes the retained elements should be
    /// updated with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeMap>,
}

impl Len for Retain {
    fn len(&self) -> usize {
        self.retain
    }
}

impl Slice for Retain {
    fn slice(&self, _offset: usize, len: usize) -> Self {
        Retain {
            retain: len,
            attributes: self.attributes.clone(),
        }
    }
}

/// Represents an operation that deletes a run of the base document.
#[derive(Arbitrary, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delete {
    /// The number of elements to delete.
    pub delete: usize,
}

impl Len for Delete {
    fn len(&self) -> usize {
        self.delete
    }
}

impl Slice for Delete {
    fn slice(&self, _offset: usize, len: usize) -> Self {
        Delete { delete: len }
    }
}

#[cfg(test)]
mod tests {
    use super::{Delete, InsertCode, InsertText, Len, Retain, Slice};

    #[test]
    fn test_slice_insert_start() {
        let op = InsertText {
            insert: "abc".to_owned(),
            attributes: None,
        };

        assert_eq!(
            op.slice(0, 1),
            InsertText {
                insert: "a".to_owned(),
                attributes: None,
            }
        );
    }

    #[test]
    fn test_slice_insert_mid() {
        let op = InsertText {
            insert: "abc".to_owned(),
            attributes: None,
        };

        assert_eq!(
            op.slice(1, 2),
            InsertText {
                insert: "bc".to_owned(),
                attributes: None,
            }
        );
    }

    #[test]
    fn test_slice_insert_keeps_attributes() {
        let attributes = [("bold".to_owned(), true.into())].into_iter().collect();
        let op = InsertText {
            insert: "abc".to_owned(),
            attributes: Some(attributes),
        };

        assert_eq!(op.slice(0, 2).attributes, op.attributes);
    }

    #[test]
    fn test_insert_len_is_utf16() {
        let op = InsertText {
            insert: "a𝄞".to_owned(),
            attributes: None,
        };

        assert_eq!(op.len(), 3);
    }

    #[test]
    fn test_slice_code_is_atomic() {
        let op = InsertCode {
            insert: 7,
            attributes: None,
        };

        assert_eq!(op.slice(0, 1), op);
        assert_eq!(op.len(), 1);
    }

    #[test]
    fn test_slice_retain() {
        let op = Retain {
            retain: 5,
            attributes: None,
        };

        assert_eq!(
            op.slice(2, 3),
            Retain {
                retain: 3,
                attributes: None,
            }
        );
    }

    #[test]
    fn test_slice_delete() {
        let op = Delete { delete: 5 };

        assert_eq!(op.slice(0, 2), Delete { delete: 2 });
    }
}
