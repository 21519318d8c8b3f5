//! Events forwarded to the UI layer.
//!
//! The UI owns a receiver and re-renders the affected region when an event
//! arrives.  Emission is fire-and-forget: a closed receiver is logged,
//! never an error for the caller.

use serde::Serialize;
use tokio::sync::mpsc;

pub const EVENT_NEW_MESSAGE: &str = "new-message";
pub const EVENT_PRESENCE_CHANGED: &str = "presence-changed";
pub const EVENT_PRESENCE_SYNCED: &str = "presence-synced";
pub const EVENT_CONTACTS_SYNCED: &str = "contacts-synced";
pub const EVENT_GALLERY_CHANGED: &str = "gallery-changed";

/// A named event with a serialized payload, ready for the UI bridge.
#[derive(Debug, Clone, Serialize)]
pub struct UiEvent {
    pub name: &'static str,
    pub payload: serde_json::Value,
}

pub type EventSender = mpsc::UnboundedSender<UiEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<UiEvent>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessagePayload {
    pub message_id: String,
    pub sender_id: String,
    pub has_attachment: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePayload {
    pub contact_id: String,
    pub online: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceSyncedPayload {
    pub online_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsSyncedPayload {
    pub contact_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPayload {
    pub item_count: usize,
}

/// Serialize and enqueue an event for the UI.
pub fn emit_event<S: Serialize>(tx: &EventSender, event: &'static str, payload: S) {
    match serde_json::to_value(payload) {
        Ok(value) => {
            if tx
                .send(UiEvent {
                    name: event,
                    payload: value,
                })
                .is_err()
            {
                tracing::warn!(event, "UI event receiver dropped");
            }
        }
        Err(e) => tracing::error!(event, error = %e, "Failed to serialize event payload"),
    }
}
