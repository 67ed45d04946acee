use std::cmp::min;

use super::attributes;
use super::iter::Iter;
use super::ops::{Delete, Retain};
use super::{Delta, Len, Op, OpKind};

/// Implemented by types that can transform another value to apply after the
/// receiver, so that concurrent edits converge.
///
/// For a pair of edits made against the same base document,
/// `a.transform(b, priority)` returns the version of `b` that applies after
/// `a`. `priority` breaks the tie when both sides insert at the same
/// position: `true` means the receiver's insert goes first and `b` has to
/// step over it.
///
/// Convergence means both orders of application meet at the same document:
///
/// ```text
/// a ∘ a.transform(b, true) ≡ b ∘ b.transform(a, false)
/// ```
pub trait Transform<Rhs> {
    /// Output type that transforming another value with the receiver
    /// produces.
    type Output;

    /// Transforms the given value with the receiver.
    fn transform(self, rhs: Rhs, priority: bool) -> Self::Output;
}

impl Transform<Delta> for Delta {
    type Output = Delta;

    fn transform(self, rhs: Delta, priority: bool) -> Self::Output {
        let mut self_iter = Iter::new(self.ops());
        let mut other_iter = Iter::new(rhs.ops());

        let mut transformed = Delta::new();

        while self_iter.has_next() || other_iter.has_next() {
            if self_iter.peek_kind() == Some(OpKind::Insert)
                && (priority || other_iter.peek_kind() != Some(OpKind::Insert))
            {
                // The receiver's insert lands first; rhs steps over it.
                let len = Iter::take(&mut self_iter, usize::MAX).len();
                transformed.push(Op::Retain(Retain {
                    retain: len,
                    attributes: None,
                }));
            } else if other_iter.peek_kind() == Some(OpKind::Insert) {
                transformed.push(Iter::take(&mut other_iter, usize::MAX));
            } else if !self_iter.has_next() {
                // The receiver never reached this range; rhs applies
                // untouched.
                transformed.push(Iter::take(&mut other_iter, usize::MAX));
            } else if !other_iter.has_next() {
                // rhs never reached this range of the receiver's edit.
                match Iter::take(&mut self_iter, usize::MAX) {
                    Op::Retain(op) => transformed.push(Op::Retain(Retain {
                        retain: op.retain,
                        attributes: attributes::transform(
                            op.attributes.as_ref(),
                            None,
                            priority,
                        ),
                    })),
                    Op::Delete(_) => {}
                    op => unreachable!("transform paired {op:?} against an exhausted edit"),
                }
            } else {
                let len = min(self_iter.peek_len(), other_iter.peek_len());

                match (Iter::take(&mut self_iter, len), Iter::take(&mut other_iter, len)) {
                    // The receiver already deleted these elements; whatever
                    // rhs wanted with them is void.
                    (Op::Delete(_), _) => {}
                    (_, Op::Delete(_)) => {
                        transformed.push(Op::Delete(Delete { delete: len }))
                    }
                    (Op::Retain(lhs), Op::Retain(rhs)) => {
                        transformed.push(Op::Retain(Retain {
                            retain: len,
                            attributes: attributes::transform(
                                lhs.attributes.as_ref(),
                                rhs.attributes.as_ref(),
                                priority,
                            ),
                        }))
                    }
                    (lhs, rhs) => unreachable!("transform paired {lhs:?} against {rhs:?}"),
                }
            }
        }

        transformed
    }
}

impl Transform<usize> for &Delta {
    type Output = usize;

    fn transform(self, rhs: usize, priority: bool) -> Self::Output {
        let mut index = rhs;
        let mut offset = 0;

        for op in self.ops() {
            if offset > index {
                break;
            }

            match op {
                Op::InsertText(_) | Op::InsertCode(_) => {
                    // An insert strictly before the caret shifts it; at the
                    // caret itself, priority decides who yields.
                    if offset < index || !priority {
                        index += op.len();
                    }

                    offset += op.len();
                }
                Op::Retain(retain) => {
                    offset += retain.retain;
                }
                Op::Delete(delete) => {
                    index -= min(delete.delete, index - offset);
                }
            }
        }

        index
    }
}

impl Delta {
    /// Transforms a caret position against this edit, so a collaborator's
    /// caret stays in place when this edit is applied under it.
    ///
    /// `priority` mirrors [`Transform`]: with `priority = true` an insert
    /// exactly at the caret yields to the caret and does not move it.
    pub fn transform_position(&self, index: usize, priority: bool) -> usize {
        self.transform(index, priority)
    }
}
