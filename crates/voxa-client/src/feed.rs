//! Bridge between the directory/presence feed and client state.
//!
//! The backend pushes [`FeedEvent`]s over an mpsc channel; the bridge task
//! is the single writer for directory and message state.  Each event is
//! applied inside one lock scope, so every derived view observed afterwards
//! reflects the whole event, never half of it.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use voxa_media::gallery;
use voxa_shared::types::{Contact, ContactId, MessageRecord};

use crate::events::{
    emit_event, ContactsSyncedPayload, EventSender, GalleryPayload, NewMessagePayload,
    PresencePayload, PresenceSyncedPayload, EVENT_CONTACTS_SYNCED, EVENT_GALLERY_CHANGED,
    EVENT_NEW_MESSAGE, EVENT_PRESENCE_CHANGED, EVENT_PRESENCE_SYNCED,
};
use crate::state::{AppState, SharedState};

/// Push updates from the directory / presence feed.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Full contact list snapshot from the directory service.
    ContactsSnapshot(Vec<Contact>),
    /// Authoritative set of contacts currently online.
    PresenceSnapshot(Vec<ContactId>),
    /// A single contact came online.
    ContactOnline(ContactId),
    /// A single contact went offline.
    ContactOffline(ContactId),
    /// A message arrived in the open conversation.
    MessageArrived(MessageRecord),
}

/// Spawn the task that drains the feed channel into client state and
/// notifies the UI.  Returns the sender half for the backend adapter.
pub fn spawn_feed_bridge(
    state: SharedState,
    events: EventSender,
    buffer: usize,
) -> mpsc::Sender<FeedEvent> {
    let (tx, rx) = mpsc::channel(buffer);
    tokio::spawn(async move {
        feed_loop(state, events, rx).await;
    });
    tx
}

async fn feed_loop(state: SharedState, events: EventSender, mut rx: mpsc::Receiver<FeedEvent>) {
    info!("Feed bridge started");

    while let Some(event) = rx.recv().await {
        if let Err(e) = apply_feed_event(&state, &events, event) {
            warn!(error = %e, "Failed to apply feed event");
        }
    }

    warn!("Feed stream ended");
}

/// Apply one feed event to state and emit the matching UI notification.
pub fn apply_feed_event(
    state: &Arc<Mutex<AppState>>,
    events: &EventSender,
    event: FeedEvent,
) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;

    match event {
        FeedEvent::ContactsSnapshot(contacts) => {
            let contact_count = contacts.len();
            guard.directory.sync_contacts(contacts);
            debug!(count = contact_count, "Contact snapshot applied");
            emit_event(
                events,
                EVENT_CONTACTS_SYNCED,
                ContactsSyncedPayload { contact_count },
            );
        }

        FeedEvent::PresenceSnapshot(online) => {
            let online_count = online.len();
            guard.directory.sync_presence(online);
            debug!(count = online_count, "Presence snapshot applied");
            emit_event(
                events,
                EVENT_PRESENCE_SYNCED,
                PresenceSyncedPayload { online_count },
            );
        }

        FeedEvent::ContactOnline(contact) => {
            guard.directory.contact_online(contact.clone());
            emit_event(
                events,
                EVENT_PRESENCE_CHANGED,
                PresencePayload {
                    contact_id: contact.to_string(),
                    online: true,
                },
            );
        }

        FeedEvent::ContactOffline(contact) => {
            guard.directory.contact_offline(&contact);
            emit_event(
                events,
                EVENT_PRESENCE_CHANGED,
                PresencePayload {
                    contact_id: contact.to_string(),
                    online: false,
                },
            );
        }

        FeedEvent::MessageArrived(message) => {
            guard.directory.on_message_arrived(&message);

            let payload = NewMessagePayload {
                message_id: message.id.to_string(),
                sender_id: message.sender.to_string(),
                has_attachment: message.attachment.is_some(),
                timestamp: message.timestamp.to_rfc3339(),
            };
            let has_attachment = message.attachment.is_some();
            guard.messages.push(message);

            if has_attachment {
                let item_count = gallery::shared_media(&guard.messages).len();
                emit_event(events, EVENT_GALLERY_CHANGED, GalleryPayload { item_count });
            }
            emit_event(events, EVENT_NEW_MESSAGE, payload);
        }
    }

    Ok(())
}
