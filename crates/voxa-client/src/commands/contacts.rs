//! Sidebar command handlers: search, selection, presence, unread badges.

use serde::Serialize;
use tracing::info;

use voxa_shared::constants::UNREAD_BADGE_MAX;
use voxa_shared::types::ContactId;

use crate::state::SharedState;

/// One sidebar row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub online: bool,
    /// "Online" / "Offline", from the live presence feed.
    pub status: String,
    /// Exact unread count.
    pub unread: u64,
    /// Clamped display form ("99+"); absent when nothing is unread.
    pub unread_badge: Option<String>,
    pub selected: bool,
}

/// Header data for the conversation's profile panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactProfileDto {
    pub id: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub online: bool,
}

/// Update the sidebar search text.
pub fn set_query(state: &SharedState, query: String) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.directory.set_query(query);
    Ok(())
}

/// The filtered, presence-annotated contact rows the sidebar shows.
pub fn visible_contacts(state: &SharedState) -> Result<Vec<ContactDto>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let directory = &guard.directory;

    Ok(directory
        .visible_contacts()
        .into_iter()
        .map(|contact| {
            let presence = directory.presence_label(&contact.id);
            let unread = directory.unread_count(&contact.id);
            ContactDto {
                id: contact.id.to_string(),
                display_name: contact.display_name.clone(),
                avatar: contact.avatar.clone(),
                bio: contact.bio.clone(),
                online: presence.is_online(),
                status: presence.label().to_string(),
                unread,
                unread_badge: format_badge(unread),
                selected: directory.selected() == Some(&contact.id),
            }
        })
        .collect())
}

/// Open a conversation.  Clears the contact's unread counter.
pub fn select_contact(state: &SharedState, contact_id: String) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let contact = ContactId::new(contact_id);
    guard
        .directory
        .select(&contact)
        .map_err(|e| e.to_string())?;
    info!(contact = %contact, "Conversation opened");
    Ok(())
}

/// Close the open conversation (back action on small screens).
pub fn deselect_contact(state: &SharedState) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.directory.clear_selection();
    Ok(())
}

/// Profile panel data for the selected contact, if any.
pub fn selected_profile(state: &SharedState) -> Result<Option<ContactProfileDto>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let directory = &guard.directory;

    Ok(directory.selected_contact().map(|contact| ContactProfileDto {
        id: contact.id.to_string(),
        display_name: contact.display_name.clone(),
        avatar: contact.avatar.clone(),
        bio: contact.bio.clone(),
        online: directory.presence_label(&contact.id).is_online(),
    }))
}

/// Display form of an unread count.  The stored count stays exact.
fn format_badge(count: u64) -> Option<String> {
    match count {
        0 => None,
        n if n > UNREAD_BADGE_MAX => Some(format!("{UNREAD_BADGE_MAX}+")),
        n => Some(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use voxa_shared::types::{Contact, Presence};

    use crate::feed::{apply_feed_event, FeedEvent};
    use crate::state::AppState;

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            display_name: name.to_string(),
            avatar: None,
            bio: Some(format!("{name}'s bio")),
            last_known: Presence::Offline,
        }
    }

    fn seeded_state() -> SharedState {
        let state: SharedState = Arc::new(Mutex::new(AppState::new()));
        state.lock().unwrap().directory.sync_contacts(vec![
            contact("a", "Annika"),
            contact("b", "Bram"),
            contact("c", "Joanne"),
        ]);
        state
    }

    #[test]
    fn test_format_badge_clamps_display_only() {
        assert_eq!(format_badge(0), None);
        assert_eq!(format_badge(1), Some("1".to_string()));
        assert_eq!(format_badge(99), Some("99".to_string()));
        assert_eq!(format_badge(100), Some("99+".to_string()));
        assert_eq!(format_badge(2500), Some("99+".to_string()));
    }

    #[test]
    fn test_query_filters_rows() {
        let state = seeded_state();
        set_query(&state, "ann".to_string()).unwrap();

        let rows = visible_contacts(&state).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, ["Annika", "Joanne"]);

        set_query(&state, String::new()).unwrap();
        assert_eq!(visible_contacts(&state).unwrap().len(), 3);
    }

    #[test]
    fn test_rows_carry_presence_and_unread() {
        let state = seeded_state();
        {
            let mut guard = state.lock().unwrap();
            guard.directory.contact_online(ContactId::new("a"));
            for _ in 0..120 {
                guard.directory.on_message_arrived(&message_from("a"));
            }
        }

        let rows = visible_contacts(&state).unwrap();
        let annika = rows.iter().find(|r| r.id == "a").unwrap();
        assert!(annika.online);
        assert_eq!(annika.status, "Online");
        assert_eq!(annika.unread, 120);
        assert_eq!(annika.unread_badge.as_deref(), Some("99+"));

        let bram = rows.iter().find(|r| r.id == "b").unwrap();
        assert!(!bram.online);
        assert_eq!(bram.unread, 0);
        assert_eq!(bram.unread_badge, None);
    }

    #[test]
    fn test_select_marks_row_and_clears_badge() {
        let state = seeded_state();
        {
            let mut guard = state.lock().unwrap();
            guard.directory.on_message_arrived(&message_from("b"));
        }

        select_contact(&state, "b".to_string()).unwrap();

        let rows = visible_contacts(&state).unwrap();
        let bram = rows.iter().find(|r| r.id == "b").unwrap();
        assert!(bram.selected);
        assert_eq!(bram.unread, 0);

        deselect_contact(&state).unwrap();
        assert!(visible_contacts(&state).unwrap().iter().all(|r| !r.selected));
    }

    #[test]
    fn test_select_unknown_contact_errors() {
        let state = seeded_state();
        let err = select_contact(&state, "ghost".to_string()).unwrap_err();
        assert_eq!(err, "Unknown contact: ghost");
    }

    #[test]
    fn test_selected_profile_reflects_live_presence() {
        let state = seeded_state();
        assert!(selected_profile(&state).unwrap().is_none());

        select_contact(&state, "a".to_string()).unwrap();
        let profile = selected_profile(&state).unwrap().unwrap();
        assert_eq!(profile.display_name, "Annika");
        assert_eq!(profile.bio.as_deref(), Some("Annika's bio"));
        assert!(!profile.online);

        state
            .lock()
            .unwrap()
            .directory
            .contact_online(ContactId::new("a"));
        assert!(selected_profile(&state).unwrap().unwrap().online);
    }

    #[test]
    fn test_rows_follow_feed_resync() {
        let state = seeded_state();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        apply_feed_event(
            &state,
            &tx,
            FeedEvent::ContactsSnapshot(vec![contact("d", "Dana")]),
        )
        .unwrap();

        let rows = visible_contacts(&state).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].display_name, "Dana");
    }

    fn message_from(id: &str) -> voxa_shared::types::MessageRecord {
        voxa_shared::types::MessageRecord {
            id: voxa_shared::types::MessageId::new(),
            sender: ContactId::new(id),
            body: Some("hi".to_string()),
            attachment: None,
            timestamp: chrono::Utc::now(),
        }
    }
}
