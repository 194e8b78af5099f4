//! Raw input events delivered by the host event loop.

/// Legacy key code carried by key-release events (DOM `event.keyCode`
/// values, e.g. 13 for Enter, 27 for Escape). Named constants are the
/// application's business.
pub type KeyCode = u32;

/// One raw host event, already resolved to identifier form.
///
/// Pointer and keyboard events carry `ancestor_ids`: the `id` attribute
/// of every element on the ancestor chain from the event target upward
/// (nearest first, empty ids omitted). The interaction monitor matches
/// that chain against the ids registered during the previous frame, so
/// hosts never need to know which elements are interactive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Click { ancestor_ids: Vec<String> },
    DoubleClick { ancestor_ids: Vec<String> },
    KeyUp { ancestor_ids: Vec<String>, code: KeyCode },
    MouseOver { ancestor_ids: Vec<String> },
    /// An element gained keyboard focus. `target_id` is `None` when the
    /// target has no usable identifier.
    Focus { target_id: Option<String> },
    /// The focused element lost keyboard focus.
    Blur,
    /// The host's navigation state changed (e.g. the location hash);
    /// always worth a re-render.
    NavigationChanged,
}
