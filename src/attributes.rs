//! Formatting attributes and the algebra that merges them.
//!
//! Retain and insert operations optionally carry a map from attribute name to
//! [`AttributeValue`]. [`AttributeValue::Null`] is a first-class tombstone: a
//! retain carrying `{"bold": null}` instructs the receiver to strip bold from
//! the retained characters. Absence of a key is a different statement (leave
//! the key alone), so both must survive [`compose`] distinctly. A missing map
//! and an empty map mean the same thing; the functions here never return an
//! empty map, they return `None` instead.

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

/// Map from attribute name to value, compared structurally and without
/// regard to insertion order.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Value of a single formatting attribute.
#[derive(Arbitrary, Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string value, e.g. a color or a link target.
    String(String),

    /// A numeric value. Integer-typed wire values are modelled as doubles.
    Number(f64),

    /// A boolean toggle, e.g. bold or italic.
    Boolean(bool),

    /// The tombstone: clears the attribute on retained characters.
    Null,
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(lhs), Self::String(rhs)) => lhs == rhs,
            // Bit-identical comparison so that NaN payloads round-trip.
            (Self::Number(lhs), Self::Number(rhs)) => lhs.to_bits() == rhs.to_bits(),
            (Self::Boolean(lhs), Self::Boolean(rhs)) => lhs == rhs,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl Eq for AttributeValue {}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Applies `left`'s attributes, then `right`'s. `right` overwrites on
/// conflicting keys and the union of keys is kept.
///
/// With `keep_null = false` the result is additionally filtered of
/// tombstones. Freshly inserted text has nothing to clear, so insert
/// compositions drop them; retain compositions pass `keep_null = true` so a
/// later retain over the same range can still observe the clearing intent.
pub fn compose(
    left: Option<&AttributeMap>,
    right: Option<&AttributeMap>,
    keep_null: bool,
) -> Option<AttributeMap> {
    let mut merged = left.cloned().unwrap_or_default();

    if let Some(right) = right {
        merged.extend(right.iter().map(|(key, value)| (key.clone(), value.clone())));
    }

    if !keep_null {
        merged.retain(|_, value| *value != AttributeValue::Null);
    }

    (!merged.is_empty()).then_some(merged)
}

/// Returns `right`'s view of its own attribute changes once `left` has
/// already been applied.
///
/// The union of both maps is kept; `priority` picks the winner on
/// conflicting keys (`true` means `left` wins). Tombstones pass through
/// unchanged, they stay meaningful until a compose strips them.
pub fn transform(
    left: Option<&AttributeMap>,
    right: Option<&AttributeMap>,
    priority: bool,
) -> Option<AttributeMap> {
    let (base, overlay) = match priority {
        true => (right, left),
        false => (left, right),
    };

    let mut merged = base.cloned().unwrap_or_default();

    if let Some(overlay) = overlay {
        merged.extend(overlay.iter().map(|(key, value)| (key.clone(), value.clone())));
    }

    (!merged.is_empty()).then_some(merged)
}

/// Returns the attribute changes that turn `left` into `right`: every key
/// whose value differs maps to `right`'s value, or to a tombstone when the
/// key disappears.
pub fn diff(left: Option<&AttributeMap>, right: Option<&AttributeMap>) -> Option<AttributeMap> {
    let empty = AttributeMap::new();
    let left = left.unwrap_or(&empty);
    let right = right.unwrap_or(&empty);

    let mut changed = AttributeMap::new();

    for key in left.keys().chain(right.keys()) {
        if left.get(key) != right.get(key) {
            let value = right.get(key).cloned().unwrap_or(AttributeValue::Null);
            changed.insert(key.clone(), value);
        }
    }

    (!changed.is_empty()).then_some(changed)
}
