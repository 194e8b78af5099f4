//! Text selection representation.

/// Represents a text selection as a byte range.
///
/// The range is always normalized such that `start <= end`. Both offsets
/// index into a UTF-8 string and are expected to sit on character
/// boundaries. A zero-width range is a plain caret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start byte offset of the selection (inclusive).
    pub start: usize,
    /// End byte offset of the selection (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range, normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A caret (zero-width selection) at the given offset.
    #[inline]
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns `true` if the selection is a plain caret.
    #[inline]
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Length of the selection in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the selection covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
