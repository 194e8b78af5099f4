//! Latching in-memory render scheduler.

use host_api::RenderScheduler;

/// Coalescing scheduler: any number of requests before the next
/// [`MemScheduler::take_pending`] collapse into a single pending frame.
#[derive(Debug, Default)]
pub struct MemScheduler {
    pending: bool,
}

impl MemScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame is currently requested.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending request, if any. The test harness calls this
    /// where a real host would fire its paint callback.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl RenderScheduler for MemScheduler {
    fn request_render(&mut self) {
        self.pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_requests_coalesce() {
        let mut scheduler = MemScheduler::new();
        assert!(!scheduler.is_pending());
        scheduler.request_render();
        scheduler.request_render();
        scheduler.request_render();
        assert!(scheduler.take_pending());
        assert!(!scheduler.take_pending());
    }
}
