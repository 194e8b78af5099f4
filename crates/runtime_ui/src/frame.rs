//! One full render cycle: snapshot, build, diff, patch, restore.
//!
//! The cycle is synchronous and single-threaded; nothing suspends
//! mid-frame and at most one frame is in flight (the scheduler
//! coalesces requests). The previous/current tree pair and the
//! frame-state maps live here with exactly one writer.

use crate::monitor::InteractionMonitor;
use host_api::{HostEvent, HostInput, HostTree, RenderScheduler};
use std::collections::BTreeMap;
use std::time::Instant;
use vtree::{BuildError, Node, TreeBuilder, apply_patches, diff};

/// Everything that survives between frames.
#[derive(Debug)]
pub struct UiRuntime {
    root_tag: String,
    previous: Option<Node>,
    monitor: InteractionMonitor,
    /// id -> live value captured during the snapshot step; drained at
    /// the end of every frame.
    input_values: BTreeMap<String, String>,
    /// Set for the whole Snapshotting..Restoring span so event handlers
    /// can drop focus/blur the restore step itself causes.
    rendering: bool,
}

impl UiRuntime {
    /// Runtime rendering under a root element of the given tag.
    pub fn new(root_tag: &str) -> Self {
        Self {
            root_tag: root_tag.to_string(),
            previous: None,
            monitor: InteractionMonitor::new(),
            input_values: BTreeMap::new(),
            rendering: false,
        }
    }

    /// The tree produced by the last completed frame.
    pub fn previous_tree(&self) -> Option<&Node> {
        self.previous.as_ref()
    }

    /// Route one host event to the interaction monitor, requesting a
    /// render only if it changed pending interaction state.
    pub fn handle_event(&mut self, event: &HostEvent, scheduler: &mut impl RenderScheduler) {
        if self.monitor.observe(event, self.rendering) {
            scheduler.request_render();
        }
    }

    /// Run one full cycle against the host. The `view` closure is the
    /// application: it walks its own data and emits the frame's tree,
    /// querying the monitor as it goes.
    ///
    /// A structural error from the builder aborts the frame: the host
    /// tree is untouched, the previous tree is kept, and the error is
    /// returned for the developer to fix.
    pub fn render_frame<H, F>(&mut self, host: &mut H, view: F) -> Result<(), BuildError>
    where
        H: HostTree + HostInput,
        F: FnOnce(&mut TreeBuilder, &mut InteractionMonitor) -> Result<(), BuildError>,
    {
        self.rendering = true;
        let result = self.run_cycle(host, view);
        self.rendering = false;
        result
    }

    fn run_cycle<H, F>(&mut self, host: &mut H, view: F) -> Result<(), BuildError>
    where
        H: HostTree + HostInput,
        F: FnOnce(&mut TreeBuilder, &mut InteractionMonitor) -> Result<(), BuildError>,
    {
        let started = Instant::now();
        self.monitor.begin_frame();

        // Snapshotting: live input values and the focused selection
        // would not survive the rebuild.
        for (id, value) in host.input_values() {
            self.input_values.insert(id, value);
        }
        if let Some(id) = self.monitor.focused_id().map(str::to_string) {
            if let Some(selection) = host.selection(&id) {
                self.monitor.record_live_selection(selection);
            }
        }

        // Building.
        let mut builder = TreeBuilder::new(&self.root_tag);
        view(&mut builder, &mut self.monitor)?;
        let root = builder.finish()?;

        // Diffing and patching.
        let patches = diff(self.previous.as_ref(), &root);
        apply_patches(host, &patches);

        // Restoring: write values back into whatever still exists, then
        // re-focus without letting the host's scroll-into-view stick.
        for (id, value) in &self.input_values {
            host.set_input_value(id, value);
        }
        if let Some(id) = self.monitor.focused_id().map(str::to_string) {
            let (scroll_x, scroll_y) = host.scroll_offset();
            if host.focus(&id) {
                host.scroll_to(scroll_x, scroll_y);
                match self.monitor.saved_selection() {
                    Some(selection) => {
                        host.set_selection(&id, selection);
                    }
                    None => {
                        host.select_end(&id);
                    }
                }
            }
        }

        // One-shot state dies with the frame.
        self.monitor.end_frame();
        self.input_values.clear();
        self.previous = Some(root);

        log::debug!(
            target: "runtime.frame",
            "rendered frame: {} patch(es) in {:?}",
            patches.len(),
            started.elapsed()
        );
        Ok(())
    }
}
