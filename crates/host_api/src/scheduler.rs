//! Render scheduling capability.

/// Trait for requesting a render at the host's next paint opportunity.
///
/// Contract:
/// - The scheduled callback runs at most once per paint opportunity.
/// - Repeated requests before the callback fires coalesce into a single
///   invocation; at most one frame is ever in flight.
/// - Requests issued from inside a running frame apply to a later paint,
///   never re-entrantly.
pub trait RenderScheduler {
    /// Ask the host to run one frame at the next paint opportunity.
    fn request_render(&mut self);
}
