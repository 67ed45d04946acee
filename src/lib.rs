#![warn(missing_docs)]
//! Rich-text operational transformation primitives: attributed edits with
//! compose, transform and cursor mapping, wire-compatible with
//! [Quill](https://quilljs.com/docs/delta/)-style deltas.
//!
//! Operational Transformation (OT) enables real-time collaborative editing:
//! two (or more) users edit the same document at the same time, and an
//! OT-capable server transforms and rebroadcasts their changes so that every
//! participant converges on the same state, even under severe latency.
//!
//! The whole model is one type: a [`Delta`] is a sequence of insert, retain
//! and delete operations describing an edit against a base document. A delta
//! consisting of inserts only consumes no base document and therefore *is* a
//! document. [`Compose`] folds two sequential edits into one, [`Transform`]
//! rewrites one of two concurrent edits so it can apply after the other, and
//! [`Delta::transform_position`] carries a collaborator's caret across a
//! remote edit.
//!
//! Inserted text is measured in UTF-16 code units and formatting is carried
//! as attribute maps with `null` tombstones, both matching the reference
//! JavaScript implementation, so serialised deltas interoperate on the wire.
//!
//! # Usage
//!
//! ```
//! use pluma::{Compose, Delta, Transform};
//!
//! let before = Delta::new().insert("Hello World", None);
//!
//! let alice = Delta::new().retain(5, None).insert(",", None);
//! let bob = Delta::new().retain(11, None).insert("!", None);
//!
//! assert_eq!(
//!     before
//!         .clone()
//!         .compose(alice.clone())?
//!         .compose(alice.clone().transform(bob.clone(), true))?,
//!     before
//!         .compose(bob.clone())?
//!         .compose(bob.transform(alice, false))?,
//! );
//! # Ok::<(), pluma::IncompatibleEdits>(())
//! ```

pub mod attributes;
mod compose;
mod delta;
mod error;
mod iter;
mod op;
pub mod ops;
mod text;
mod transform;

pub use attributes::{AttributeMap, AttributeValue};
pub use compose::Compose;
pub use delta::Delta;
pub use error::IncompatibleEdits;
pub use iter::Iter;
pub use op::{Len, Op, OpKind, Slice};
pub use transform::Transform;
