//! Host input-widget capability.
//!
//! The frame lifecycle rebuilds the display tree every frame, which would
//! destroy transient widget state the tree model cannot represent:
//! text-box contents, focus, and the caret selection. This trait is how
//! the lifecycle snapshots that state before a frame and writes it back
//! afterward.
//!
//! All operations are keyed by the element's `id` attribute. An id that
//! no longer resolves to a live widget is an expected race (the widget
//! was just replaced or removed), so write operations report success
//! with `bool` instead of failing.

use crate::selection::SelectionRange;

/// Trait defining the input-state interface consumed by the frame lifecycle.
pub trait HostInput {
    /// Current `(id, value)` pairs of every live text widget that carries
    /// a non-empty `id` attribute, in document order.
    fn input_values(&self) -> Vec<(String, String)>;

    /// Write a text widget's value. Returns `false` if `id` does not
    /// resolve to a live text widget.
    fn set_input_value(&mut self, id: &str, value: &str) -> bool;

    /// Current selection range of the text widget with this id.
    fn selection(&self, id: &str) -> Option<SelectionRange>;

    /// Restore a saved selection range. Returns `false` if `id` does not
    /// resolve to a live text widget.
    fn set_selection(&mut self, id: &str, selection: SelectionRange) -> bool;

    /// Collapse the selection to a caret at the end of the current value.
    ///
    /// Used when the engine has no saved range for a freshly focused
    /// widget. Returns `false` if `id` does not resolve.
    fn select_end(&mut self, id: &str) -> bool;

    /// Give keyboard focus to the element with this id. Returns `false`
    /// if `id` does not resolve.
    ///
    /// Hosts are allowed to scroll the focused element into view; the
    /// caller compensates via [`HostInput::scroll_offset`] and
    /// [`HostInput::scroll_to`].
    fn focus(&mut self, id: &str) -> bool;

    /// Current viewport scroll offset.
    fn scroll_offset(&self) -> (i32, i32);

    /// Restore a previously read viewport scroll offset.
    fn scroll_to(&mut self, x: i32, y: i32);
}
