use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Signals emitted by admin pages for other modules to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AdminEvent {
    /// A dashboard page is about to render; listeners register widgets,
    /// assets and menu entries.
    DashboardInit,
}

impl AdminEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AdminEvent::DashboardInit => "admin.dashboard.init",
        }
    }
}

/// Notification sink handed to controllers.
pub trait EventSink: Send + Sync {
    fn notify(&self, event: &AdminEvent);
}

/// In-process sink backed by a tokio broadcast channel.
///
/// Events with no live subscriber are dropped.
pub struct BroadcastEventSink {
    tx: broadcast::Sender<AdminEvent>,
}

impl BroadcastEventSink {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for BroadcastEventSink {
    fn notify(&self, event: &AdminEvent) {
        tracing::debug!(event = event.name(), "admin event");
        let _ = self.tx.send(event.clone());
    }
}
