//! Client event emission
//!
//! The registry only needs a place to drop events; it never waits for, or
//! learns about, delivery.

use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

/// Event name used for every marker state change
pub const MARKERS_CHANGED: &str = "markers_changed";

/// Hint telling the client whether to focus a marker after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSelect {
    #[default]
    None,
    First,
    Specific,
}

impl AutoSelect {
    pub fn wire_value(self) -> i64 {
        match self {
            AutoSelect::None => 0,
            AutoSelect::First => 1,
            AutoSelect::Specific => 2,
        }
    }

    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(AutoSelect::None),
            1 => Some(AutoSelect::First),
            2 => Some(AutoSelect::Specific),
            _ => None,
        }
    }
}

/// An event pushed to the connected client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientEvent {
    pub event: String,
    pub data: Value,
}

impl ClientEvent {
    pub fn markers_changed(markers_state: Value, auto_select: AutoSelect) -> Self {
        Self {
            event: MARKERS_CHANGED.to_string(),
            data: json!({
                "markers_state": markers_state,
                "auto_select": auto_select.wire_value(),
            }),
        }
    }
}

/// Anything that can accept a client event
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Enqueues `event`. Must not block and must not fail the caller.
    fn notify(&self, event: ClientEvent);
}

/// Notifier backed by an unbounded tokio channel owned by the transport
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<ClientEvent>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<ClientEvent>) -> Self {
        Self { tx }
    }

    /// Creates a notifier together with the receiving end of its channel
    pub fn channel() -> (Self, UnboundedReceiver<ClientEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: ClientEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!("Dropping '{}' event: no client attached", e.0.event);
        }
    }
}
