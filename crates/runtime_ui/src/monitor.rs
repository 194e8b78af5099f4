//! Per-frame interaction interest tracking and pending-event mailboxes.
//!
//! Builder code asks "did this happen to me" while a frame is building;
//! the same call registers the id as interesting for the *next* host
//! event. Registration and query must be one operation because the
//! monitor has to know, before the next event arrives, which ids it
//! should match the ancestor chain against.
//!
//! Each event category is a single-slot mailbox holding the most recent
//! matching event. Rapid same-category events collapse to the latest;
//! that is documented behavior, not a queue waiting to be added.
//! Click, double-click, and key-release are one-shot (cleared at frame
//! end); hover and focus persist until a new host event changes them.

use host_api::{HostEvent, KeyCode, SelectionRange};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct InteractionMonitor {
    // Interest sets registered during the current frame's build.
    clickable: HashSet<String>,
    double_clickable: HashSet<String>,
    hoverable: HashSet<String>,
    key_watchers: HashMap<String, Vec<KeyCode>>,

    // Pending mailboxes, filled by host events between frames.
    pending_click: Option<String>,
    pending_double_click: Option<String>,
    pending_key: Option<(String, KeyCode)>,
    hover_ids: Vec<String>,

    focus_id: Option<String>,
    /// `None` is the sentinel: place the caret at the end on restore.
    focus_selection: Option<SelectionRange>,
}

impl InteractionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a host event against the interest sets registered during
    /// the previous frame. Returns whether a re-render is warranted.
    ///
    /// Focus and blur are dropped while `rendering` is set: the restore
    /// step of a running frame itself fires them, and reacting would
    /// loop.
    pub fn observe(&mut self, event: &HostEvent, rendering: bool) -> bool {
        match event {
            HostEvent::Click { ancestor_ids } => {
                match nearest(ancestor_ids, &self.clickable) {
                    Some(id) => {
                        self.pending_click = Some(id);
                        true
                    }
                    None => false,
                }
            }
            HostEvent::DoubleClick { ancestor_ids } => {
                match nearest(ancestor_ids, &self.double_clickable) {
                    Some(id) => {
                        self.pending_double_click = Some(id);
                        true
                    }
                    None => false,
                }
            }
            HostEvent::KeyUp { ancestor_ids, code } => {
                let Some(id) = ancestor_ids
                    .iter()
                    .find(|id| self.key_watchers.contains_key(*id))
                else {
                    return false;
                };
                if !self.key_watchers[id].contains(code) {
                    return false;
                }
                self.pending_key = Some((id.clone(), *code));
                true
            }
            HostEvent::MouseOver { ancestor_ids } => {
                let chain: Vec<String> = ancestor_ids
                    .iter()
                    .filter(|id| self.hoverable.contains(*id))
                    .cloned()
                    .collect();
                if chain == self.hover_ids {
                    return false;
                }
                self.hover_ids = chain;
                true
            }
            HostEvent::Focus { target_id } => {
                if rendering {
                    return false;
                }
                let new_focus = target_id.clone().filter(|id| !id.is_empty());
                if new_focus == self.focus_id {
                    return false;
                }
                self.focus_id = new_focus;
                true
            }
            HostEvent::Blur => {
                if rendering {
                    return false;
                }
                self.focus_id.take().is_some()
            }
            HostEvent::NavigationChanged => true,
        }
    }

    /// Was `id` clicked since the last frame? Registers `id` as
    /// click-interesting for the frame being built.
    pub fn was_clicked(&mut self, id: &str) -> bool {
        self.clickable.insert(id.to_string());
        self.pending_click.as_deref() == Some(id)
    }

    /// Double-click flavor of [`InteractionMonitor::was_clicked`].
    pub fn was_double_clicked(&mut self, id: &str) -> bool {
        self.double_clickable.insert(id.to_string());
        self.pending_double_click.as_deref() == Some(id)
    }

    /// Is the pointer currently over `id` (or a descendant)? Registers
    /// `id` as hover-interesting. Unlike the click queries this is not
    /// one-shot; hover persists until the pointer moves elsewhere.
    pub fn is_hovering(&mut self, id: &str) -> bool {
        self.hoverable.insert(id.to_string());
        self.hover_ids.iter().any(|hovered| hovered == id)
    }

    /// Was `code` released on `id` since the last frame? Registers the
    /// (id, code) pair; key-up events for unregistered codes never match.
    pub fn was_key_released(&mut self, id: &str, code: KeyCode) -> bool {
        let codes = self.key_watchers.entry(id.to_string()).or_default();
        if !codes.contains(&code) {
            codes.push(code);
        }
        self.pending_key
            .as_ref()
            .is_some_and(|(pending_id, pending_code)| pending_id == id && *pending_code == code)
    }

    /// Programmatically move focus to `id`, with the caret at the end of
    /// the value once restored.
    pub fn focus(&mut self, id: &str) {
        self.focus_id = Some(id.to_string());
        self.focus_selection = None;
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focus_id.as_deref() == Some(id)
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus_id.as_deref()
    }

    /// Selection to restore after patching; `None` means caret-at-end.
    pub(crate) fn saved_selection(&self) -> Option<SelectionRange> {
        self.focus_selection
    }

    /// Overwrite the sentinel with the live selection read during the
    /// snapshot step.
    pub(crate) fn record_live_selection(&mut self, selection: SelectionRange) {
        self.focus_selection = Some(selection);
    }

    /// Reset the interest sets at the start of a build; whatever the
    /// view queries this frame becomes the next event filter.
    pub(crate) fn begin_frame(&mut self) {
        self.clickable.clear();
        self.double_clickable.clear();
        self.hoverable.clear();
        self.key_watchers.clear();
    }

    /// Drain the one-shot mailboxes at the end of a frame. Hover and
    /// focus persist; the selection slot returns to the sentinel.
    pub(crate) fn end_frame(&mut self) {
        self.pending_click = None;
        self.pending_double_click = None;
        self.pending_key = None;
        self.focus_selection = None;
    }
}

/// The nearest ancestor id present in the interest set.
fn nearest(ancestor_ids: &[String], interesting: &HashSet<String>) -> Option<String> {
    ancestor_ids
        .iter()
        .find(|id| interesting.contains(*id))
        .cloned()
}
