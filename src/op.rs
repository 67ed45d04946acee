use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

use super::attributes::AttributeMap;
use super::ops::{Delete, InsertCode, InsertText, Retain};

/// Implemented by types that have a length in document elements.
///
/// Text lengths are measured in UTF-16 code units, embedded codes count as a
/// single element.
pub trait Len {
    /// Should return the exact length of the receiver.
    fn len(&self) -> usize;
}

/// Implemented by operations that can produce a fragment of themselves.
pub trait Slice {
    /// Returns the fragment of `len` elements starting `offset` elements
    /// into the receiver. Atomic operations return themselves whole.
    fn slice(&self, offset: usize, len: usize) -> Self;
}

/// Individual insert, retain or delete operation.
#[derive(Arbitrary, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Op {
    /// Inserts a run of text. [Click here](InsertText) to read more about
    /// text insert operations.
    InsertText(InsertText),

    /// Inserts a single embedded code. [Click here](InsertCode) to read more
    /// about code insert operations.
    InsertCode(InsertCode),

    /// Retains a run of the base document. [Click here](Retain) to read more
    /// about retain operations.
    Retain(Retain),

    /// Deletes a run of the base document. [Click here](Delete) to read more
    /// about delete operations.
    Delete(Delete),
}

/// Coarse kind of an [`Op`], as observed by the iterator's peek.
///
/// Both insert variants collapse to [`OpKind::Insert`]: the compose and
/// transform loops route them identically and only distinguish the payloads
/// once an operation is actually consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    /// Either insert variant.
    Insert,

    /// A retain.
    Retain,

    /// A delete.
    Delete,
}

impl Op {
    /// Returns the coarse kind of this operation.
    pub fn kind(&self) -> OpKind {
        match self {
            Self::InsertText(_) | Self::InsertCode(_) => OpKind::Insert,
            Self::Retain(_) => OpKind::Retain,
            Self::Delete(_) => OpKind::Delete,
        }
    }

    /// Returns the attributes carried by this operation, if any. Deletes
    /// never carry attributes.
    pub fn attributes(&self) -> Option<&AttributeMap> {
        match self {
            Self::InsertText(InsertText { attributes, .. })
            | Self::InsertCode(InsertCode { attributes, .. })
            | Self::Retain(Retain { attributes, .. }) => attributes.as_ref(),
            Self::Delete(_) => None,
        }
    }

    pub(crate) fn attributes_slot(&mut self) -> Option<&mut Option<AttributeMap>> {
        match self {
            Self::InsertText(InsertText { attributes, .. })
            | Self::InsertCode(InsertCode { attributes, .. })
            | Self::Retain(Retain { attributes, .. }) => Some(attributes),
            Self::Delete(_) => None,
        }
    }
}

impl Len for Op {
    fn len(&self) -> usize {
        match self {
            Self::InsertText(insert) => insert.len(),
            Self::InsertCode(insert) => insert.len(),
            Self::Retain(retain) => retain.len(),
            Self::Delete(delete) => delete.len(),
        }
    }
}

impl Slice for Op {
    fn slice(&self, offset: usize, len: usize) -> Op {
        match self {
            Self::InsertText(insert) => insert.slice(offset, len).into(),
            Self::InsertCode(insert) => insert.slice(offset, len).into(),
            Self::Retain(retain) => retain.slice(offset, len).into(),
            Self::Delete(delete) => delete.slice(offset, len).into(),
        }
    }
}

impl From<InsertText> for Op {
    fn from(value: InsertText) -> Self {
        Self::InsertText(value)
    }
}

impl From<InsertCode> for Op {
    fn from(value: InsertCode) -> Self {
        Self::InsertCode(value)
    }
}

impl From<Retain> for Op {
    fn from(value: Retain) -> Self {
        Self::Retain(value)
    }
}

impl From<Delete> for Op {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
