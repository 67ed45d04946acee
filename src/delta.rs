use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

use super::attributes::{AttributeMap, AttributeValue};
use super::ops::{Delete, InsertCode, InsertText, Retain};
use super::{Len, Op};

/// Series of insert, retain and delete operations describing an edit against
/// a base document.
///
/// An edit whose [`base_len`](Delta::base_len) is zero contains only inserts
/// and doubles as a document: the canonical representation of concrete
/// rich-text content. Historical edits and present documents share this one
/// type.
///
/// Deltas are normalised by construction: [`Delta::push`] drops zero-length
/// operations and coalesces adjacent operations of the same kind and
/// attribute set, so structural equality of two deltas is meaningful.
#[derive(Arbitrary, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    ops: Vec<Op>,
}

impl Delta {
    /// Returns a new empty delta (i.e. an empty series of operations).
    pub fn new() -> Delta {
        Delta {
            ops: Default::default(),
        }
    }

    /// Returns a new delta with one text insert operation appended. Pass
    /// `None` if the text carries no attributes.
    pub fn insert(mut self, insert: impl Into<String>, attributes: impl Into<Option<AttributeMap>>) -> Self {
        self.push(Op::InsertText(InsertText {
            insert: insert.into(),
            attributes: attributes.into(),
        }));

        self
    }

    /// Returns a new delta with one embedded-code insert operation appended.
    /// Pass `None` if the code carries no attributes.
    pub fn insert_code(mut self, code: u32, attributes: impl Into<Option<AttributeMap>>) -> Self {
        self.push(Op::InsertCode(InsertCode {
            insert: code,
            attributes: attributes.into(),
        }));

        self
    }

    /// Returns a new delta that retains the given number of elements,
    /// optionally updating their attributes. Pass `None` if this operation
    /// should leave the attributes alone.
    pub fn retain(mut self, retain: usize, attributes: impl Into<Option<AttributeMap>>) -> Self {
        self.push(Op::Retain(Retain {
            retain,
            attributes: attributes.into(),
        }));

        self
    }

    /// Returns a new delta that deletes the given number of elements.
    pub fn delete(mut self, delete: usize) -> Self {
        self.push(Op::Delete(Delete { delete }));
        self
    }

    /// Returns the operations of this delta in order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Returns `true` if this delta contains no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the number of elements of the base document this edit
    /// consumes: the summed lengths of its retains and deletes.
    pub fn base_len(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Retain(_) | Op::Delete(_) => op.len(),
                Op::InsertText(_) | Op::InsertCode(_) => 0,
            })
            .sum()
    }

    /// Returns the number of elements of the target document this edit
    /// produces: the summed lengths of its retains and inserts.
    pub fn target_len(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Delete(_) => 0,
                op => op.len(),
            })
            .sum()
    }

    /// Returns `true` if this edit consumes no base document, i.e. consists
    /// of inserts only and therefore represents a concrete document.
    pub fn is_document(&self) -> bool {
        self.base_len() == 0
    }

    /// Returns this delta with the given operation appended, coalescing it
    /// into the last operation where possible.
    pub fn append(mut self, op: Op) -> Self {
        self.push(op);
        self
    }

    /// Returns this delta with the given operation prepended, coalescing the
    /// old first operation into it where possible.
    pub fn prepend(self, op: Op) -> Self {
        let mut out = Delta::new();
        out.push(op);
        out.extend(self);
        out
    }

    /// Re-runs the coalescing pass over this delta's operations.
    ///
    /// Deltas built through [`Delta::push`] are already in this form, so the
    /// pass is idempotent; it is useful for deltas that arrived through
    /// deserialization or other raw construction.
    pub fn normalize(self) -> Self {
        self.into_iter().collect()
    }

    /// Appends the given operation to this series, dropping it when it has
    /// zero length and merging it into the previous operation when both are
    /// of the same kind and carry equal attributes. Embedded codes are
    /// atomic and never merge. No reordering takes place.
    ///
    /// Tombstones are dropped from insert attributes here: freshly inserted
    /// content has nothing to clear, and keeping them would make otherwise
    /// equal edits compare unequal.
    ///
    /// Keep in mind that this is different from composition: pushing a
    /// [`Delete`] onto a delta literally adds that operation to the sequence
    /// (as opposed to applying it).
    pub fn push(&mut self, mut op: Op) {
        match &mut op {
            Op::InsertText(InsertText {
                attributes: Some(attributes),
                ..
            })
            | Op::InsertCode(InsertCode {
                attributes: Some(attributes),
                ..
            }) => {
                attributes.retain(|_, value| *value != AttributeValue::Null);
            }
            _ => {}
        }

        if let Some(attributes) = op.attributes_slot() {
            if attributes.as_ref().is_some_and(AttributeMap::is_empty) {
                *attributes = None;
            }
        }

        if op.len() == 0 {
            return;
        }

        let Some(last) = self.ops.last_mut() else {
            self.ops.push(op);
            return;
        };

        match last {
            Op::InsertText(InsertText {
                insert: last_insert,
                attributes: last_attributes,
            }) => match op {
                Op::InsertText(InsertText {
                    insert,
                    ref attributes,
                }) if last_attributes == attributes => {
                    last_insert.push_str(&insert);
                }
                Op::InsertText(_) | Op::InsertCode(_) | Op::Retain(_) | Op::Delete(_) => {
                    self.ops.push(op);
                }
            },
            Op::Retain(Retain {
                retain: last_retain,
                attributes: last_attributes,
            }) => match op {
                Op::Retain(Retain { retain, attributes }) if last_attributes == &attributes => {
                    match last_retain.overflowing_add(retain) {
                        (retain, false) => *last_retain = retain,
                        (retain, true) => {
                            *last_retain = usize::MAX;
                            self.ops.push(Op::Retain(Retain {
                                retain: retain + 1,
                                attributes,
                            }))
                        }
                    }
                }
                Op::InsertText(_) | Op::InsertCode(_) | Op::Retain(_) | Op::Delete(_) => {
                    self.ops.push(op);
                }
            },
            Op::Delete(Delete {
                delete: last_delete,
            }) => match op {
                Op::Delete(Delete { delete }) => match last_delete.overflowing_add(delete) {
                    (delete, false) => *last_delete = delete,
                    (delete, true) => {
                        *last_delete = usize::MAX;
                        self.ops.push(Op::Delete(Delete { delete: delete + 1 }))
                    }
                },
                Op::InsertText(_) | Op::InsertCode(_) | Op::Retain(_) => {
                    self.ops.push(op);
                }
            },
            Op::InsertCode(_) => {
                self.ops.push(op);
            }
        }
    }
}

impl Extend<Op> for Delta {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Op>,
    {
        iter.into_iter().for_each(|op| self.push(op))
    }
}

impl FromIterator<Op> for Delta {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Op>,
    {
        let mut delta = Delta::new();
        delta.extend(iter);
        delta
    }
}

impl IntoIterator for Delta {
    type Item = Op;

    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
