use async_trait::async_trait;
use vinyasa_core::{ConnectionId, ServerEvent};

/// Seam between the coordination core and whatever transport owns the
/// connections. The bundled WebSocket gateway implements this; tests
/// substitute a capturing mock.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event to one connection, best-effort. Returns `false`
    /// when the target's outbound channel is gone; callers count that as
    /// a skipped peer, never an error.
    async fn deliver(&self, target: ConnectionId, event: ServerEvent) -> bool;
}
