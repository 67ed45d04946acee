use std::cmp::min;

use super::attributes;
use super::iter::Iter;
use super::ops::{Delete, InsertCode, InsertText, Retain};
use super::{Delta, IncompatibleEdits, Op, OpKind};

/// Implemented by types that can apply a series of operations in sequence.
///
/// For a pair of edits this folds "apply `self`, then apply `rhs`" into a
/// single equivalent edit. The two edits must chain: `self`'s target length
/// is `rhs`'s base length, anything else is an [`IncompatibleEdits`] error.
///
/// The fold routes each step by the pair of operations at the front of both
/// edits:
///
/// | `self` \ `rhs` | Insert           | Retain              | Delete     |
/// |:---------------|:-----------------|:--------------------|:-----------|
/// | Insert         | rhs goes first   | insert, merge attrs | cancel     |
/// | Retain         | rhs goes first   | retain, merge attrs | delete     |
/// | Delete         | rhs goes first   | self goes first     | self first |
///
/// Attribute merging keeps tombstones on retained ranges (a later edit may
/// still need to observe the clearing intent) and strips them from inserts
/// (freshly inserted content has nothing to clear).
pub trait Compose<Rhs> {
    /// Output type that applying a series of operations to this type
    /// produces.
    type Output;

    /// Applies the given series of operations to the receiver and returns
    /// the result.
    fn compose(self, rhs: Rhs) -> Self::Output;
}

impl Compose<Delta> for Delta {
    type Output = Result<Delta, IncompatibleEdits>;

    fn compose(self, rhs: Delta) -> Self::Output {
        if self.target_len() != rhs.base_len() {
            return Err(IncompatibleEdits {
                target: self.target_len(),
                base: rhs.base_len(),
            });
        }

        if self.is_empty() {
            return Ok(rhs);
        }

        if rhs.is_empty() {
            return Ok(self);
        }

        let mut self_iter = Iter::new(self.ops());
        let mut other_iter = Iter::new(rhs.ops());

        let mut composed = Delta::new();

        while self_iter.has_next() || other_iter.has_next() {
            if other_iter.peek_kind() == Some(OpKind::Insert) {
                // rhs inserts in front of whatever self produced here.
                composed.push(Iter::take(&mut other_iter, usize::MAX));
            } else if self_iter.peek_kind() == Some(OpKind::Delete) {
                // Deleted base elements are invisible to rhs.
                composed.push(Iter::take(&mut self_iter, usize::MAX));
            } else {
                let len = min(self_iter.peek_len(), other_iter.peek_len());

                match (Iter::take(&mut self_iter, len), Iter::take(&mut other_iter, len)) {
                    (Op::Retain(lhs), Op::Retain(rhs)) => composed.push(Op::Retain(Retain {
                        retain: len,
                        attributes: attributes::compose(
                            lhs.attributes.as_ref(),
                            rhs.attributes.as_ref(),
                            true,
                        ),
                    })),
                    (Op::Retain(_), Op::Delete(_)) => {
                        composed.push(Op::Delete(Delete { delete: len }))
                    }
                    (Op::InsertText(lhs), Op::Retain(rhs)) => {
                        composed.push(Op::InsertText(InsertText {
                            insert: lhs.insert,
                            attributes: attributes::compose(
                                lhs.attributes.as_ref(),
                                rhs.attributes.as_ref(),
                                false,
                            ),
                        }))
                    }
                    (Op::InsertCode(lhs), Op::Retain(rhs)) => {
                        composed.push(Op::InsertCode(InsertCode {
                            insert: lhs.insert,
                            attributes: attributes::compose(
                                lhs.attributes.as_ref(),
                                rhs.attributes.as_ref(),
                                false,
                            ),
                        }))
                    }
                    (Op::InsertText(_) | Op::InsertCode(_), Op::Delete(_)) => {
                        // rhs deletes what self inserted; both disappear.
                    }
                    (lhs, rhs) => unreachable!("compose paired {lhs:?} against {rhs:?}"),
                }
            }
        }

        debug_assert_eq!(composed.base_len(), self.base_len());
        debug_assert_eq!(composed.target_len(), rhs.target_len());

        Ok(composed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::attributes::{AttributeMap, AttributeValue};
    use super::{Compose, Delta, IncompatibleEdits};

    fn attrs<const N: usize>(entries: [(&str, AttributeValue); N]) -> AttributeMap {
        entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect()
    }

    #[test]
    fn test_insert_insert() {
        let a = Delta::new().insert("A", None);
        let b = Delta::new().insert("B", None).retain(1, None);

        assert_eq!(a.compose(b), Ok(Delta::new().insert("BA", None)));
    }

    #[test]
    fn test_insert_retain() {
        let a = Delta::new().insert("A", None);
        let b = Delta::new().retain(1, None);

        assert_eq!(a.compose(b), Ok(Delta::new().insert("A", None)));
    }

    #[test]
    fn test_insert_delete() {
        let a = Delta::new().insert("A", None);
        let b = Delta::new().delete(1);

        assert_eq!(a.compose(b), Ok(Delta::new()));
    }

    #[test]
    fn test_code_delete() {
        let a = Delta::new().insert_code(0, None);
        let b = Delta::new().delete(1);

        assert_eq!(a.compose(b), Ok(Delta::new()));
    }

    #[test]
    fn test_retain_insert() {
        let a = Delta::new().retain(1, attrs([("bold", true.into())]));
        let b = Delta::new().insert("A", None).retain(1, None);

        assert_eq!(
            a.compose(b),
            Ok(Delta::new()
                .insert("A", None)
                .retain(1, attrs([("bold", true.into())])))
        );
    }

    #[test]
    fn test_retain_retain() {
        let a = Delta::new().retain(2, None);
        let b = Delta::new().retain(2, attrs([("bold", true.into())]));

        assert_eq!(
            a.compose(b),
            Ok(Delta::new().retain(2, attrs([("bold", true.into())])))
        );
    }

    #[test]
    fn test_retain_delete() {
        let a = Delta::new().retain(1, None);
        let b = Delta::new().delete(1);

        assert_eq!(a.compose(b), Ok(Delta::new().delete(1)));
    }

    #[test]
    fn test_delete_insert() {
        let a = Delta::new().delete(1);
        let b = Delta::new().insert("B", None);

        assert_eq!(
            a.compose(b),
            Ok(Delta::new().insert("B", None).delete(1))
        );
    }

    #[test]
    fn test_delete_retain() {
        let a = Delta::new().delete(1).retain(1, None);
        let b = Delta::new().retain(1, attrs([("bold", true.into())]));

        assert_eq!(
            a.compose(b),
            Ok(Delta::new()
                .delete(1)
                .retain(1, attrs([("bold", true.into())])))
        );
    }

    #[test]
    fn test_delete_delete() {
        let a = Delta::new().delete(1).retain(2, None);
        let b = Delta::new().delete(2);

        assert_eq!(a.compose(b), Ok(Delta::new().delete(3)));
    }

    #[test]
    fn test_empty_sides() {
        let deletes = Delta::new().delete(2);

        assert_eq!(deletes.clone().compose(Delta::new()), Ok(deletes));

        let document = Delta::new().insert("abc", None);

        assert_eq!(Delta::new().compose(document.clone()), Ok(document));
    }

    #[test]
    fn test_incompatible_lengths() {
        let a = Delta::new().insert("sixteen elements", None);
        let b = Delta::new().retain(20, None).delete(5);

        assert_eq!(a.target_len(), 16);
        assert_eq!(b.base_len(), 25);
        assert_eq!(
            a.compose(b),
            Err(IncompatibleEdits {
                target: 16,
                base: 25,
            })
        );
    }

    #[test]
    fn test_insert_mid() {
        let a = Delta::new().insert("Hello", None);
        let b = Delta::new().retain(3, None).insert("X", None).retain(2, None);

        assert_eq!(a.compose(b), Ok(Delta::new().insert("HelXlo", None)));
    }

    #[test]
    fn test_delete_all() {
        let a = Delta::new().retain(4, None).insert("Hello", None);
        let b = Delta::new().delete(9);

        assert_eq!(a.compose(b), Ok(Delta::new().delete(4)));
    }

    #[test]
    fn test_overlap_attributes_union() {
        let a = Delta::new().retain(8, attrs([("color", "#123".into())]));
        let b = Delta::new()
            .retain(4, attrs([("bold", true.into())]))
            .retain(4, None);

        assert_eq!(
            a.compose(b),
            Ok(Delta::new()
                .retain(
                    4,
                    attrs([("bold", true.into()), ("color", "#123".into())])
                )
                .retain(4, attrs([("color", "#123".into())])))
        );
    }

    #[test]
    fn test_retain_keeps_tombstone() {
        let a = Delta::new().retain(1, None);
        let b = Delta::new().retain(1, attrs([("bold", AttributeValue::Null)]));

        assert_eq!(
            a.compose(b),
            Ok(Delta::new().retain(1, attrs([("bold", AttributeValue::Null)])))
        );
    }

    #[test]
    fn test_insert_strips_tombstone() {
        let a = Delta::new().insert("a", attrs([("bold", true.into())]));
        let b = Delta::new().retain(
            1,
            attrs([("bold", AttributeValue::Null), ("italic", true.into())]),
        );

        assert_eq!(
            a.compose(b),
            Ok(Delta::new().insert("a", attrs([("italic", true.into())])))
        );
    }

    #[test]
    fn test_code_strips_tombstone() {
        let a = Delta::new().insert_code(0, attrs([("bold", true.into())]));
        let b = Delta::new().retain(
            1,
            attrs([("bold", AttributeValue::Null), ("color", "red".into())]),
        );

        assert_eq!(
            a.compose(b),
            Ok(Delta::new().insert_code(0, attrs([("color", "red".into())])))
        );
    }

    #[test]
    fn test_tombstone_survives_until_insert() {
        let strip = Delta::new().retain(1, attrs([("bold", AttributeValue::Null)]));
        let keep = Delta::new().retain(1, None);

        // The clearing intent must survive an intermediate compose ...
        let chained = strip.compose(keep).unwrap();
        assert_eq!(
            chained,
            Delta::new().retain(1, attrs([("bold", AttributeValue::Null)]))
        );

        // ... and land on the insert that finally absorbs it.
        let document = Delta::new().insert("a", attrs([("bold", true.into())]));
        assert_eq!(
            document.compose(chained),
            Ok(Delta::new().insert("a", None))
        );
    }

    #[test]
    fn test_length_chaining() {
        let a = Delta::new()
            .retain(2, None)
            .insert("xy", None)
            .delete(1)
            .insert_code(3, None);
        let b = Delta::new()
            .retain(1, None)
            .delete(2)
            .insert("z", None)
            .retain(2, None);

        let composed = a.clone().compose(b.clone()).unwrap();

        assert_eq!(composed.base_len(), a.base_len());
        assert_eq!(composed.target_len(), b.target_len());
    }

    #[test]
    fn test_associativity() {
        let a = Delta::new().retain(2, None).insert("xy", None).delete(1);
        let b = Delta::new()
            .retain(1, None)
            .delete(2)
            .insert("z", None)
            .retain(1, None);
        let c = Delta::new()
            .delete(1)
            .retain(2, attrs([("bold", true.into())]));

        let left = a.clone().compose(b.clone()).unwrap().compose(c.clone()).unwrap();
        let right = a.compose(b.compose(c).unwrap()).unwrap();

        assert_eq!(left, right);
    }
}
