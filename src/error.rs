use thiserror::Error;

/// Error returned by [`Compose`](crate::Compose) when two edits do not chain:
/// the left edit produces a document of one length while the right edit
/// expects a base document of another.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("incompatible edits: left edit produces {target} elements, right edit consumes {base}")]
pub struct IncompatibleEdits {
    /// Target length of the left edit.
    pub target: usize,

    /// Base length of the right edit.
    pub base: usize,
}
