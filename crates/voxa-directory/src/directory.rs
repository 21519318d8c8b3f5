//! Presence-aware contact list derivation.
//!
//! Holds read-only snapshots owned by the directory service and the
//! presence feed, plus the local search text, selection, and unread
//! counters.  The visible list and presence labels are derived on every
//! read from the latest snapshots, never cached.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use voxa_shared::types::{Contact, ContactId, MessageRecord, Presence};

use crate::unread::UnreadIndex;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// `select` was asked for an id the directory has never reported.
    #[error("Unknown contact: {0}")]
    UnknownContact(ContactId),
}

/// Derives the sidebar view: filtered contacts, presence labels, unread
/// counts, and the selected conversation.
#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
    online: HashSet<ContactId>,
    query: String,
    selected: Option<ContactId>,
    unread: UnreadIndex,
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contact snapshot with the latest from the directory
    /// service.  Counters and the selection must not outlive their contact.
    pub fn sync_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;

        let known: HashSet<ContactId> = self.contacts.iter().map(|c| c.id.clone()).collect();
        self.unread.retain_known(|id| known.contains(id));
        if let Some(selected) = self.selected.take() {
            if known.contains(&selected) {
                self.selected = Some(selected);
            } else {
                debug!(contact = %selected, "Selected contact left the directory");
            }
        }
    }

    /// Replace the presence snapshot.  The feed is authoritative; whatever
    /// it reports wins over anything derived earlier.
    pub fn sync_presence(&mut self, online: impl IntoIterator<Item = ContactId>) {
        self.online = online.into_iter().collect();
    }

    /// Single delta from the presence feed: a contact came online.
    pub fn contact_online(&mut self, contact: ContactId) {
        self.online.insert(contact);
    }

    /// Single delta from the presence feed: a contact went offline.
    pub fn contact_offline(&mut self, contact: &ContactId) {
        self.online.remove(contact);
    }

    /// Update the sidebar search text.  Counters and presence are
    /// untouched.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The contacts the sidebar shows right now.
    ///
    /// Empty query: the full snapshot in the directory's order.  Otherwise
    /// the subsequence whose display name contains the query
    /// (case-insensitive), relative order preserved.
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        if self.query.is_empty() {
            return self.contacts.iter().collect();
        }
        let needle = self.query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.display_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Open a conversation: select the contact and zero its unread count.
    ///
    /// An id the directory has never reported is rejected without touching
    /// selection or counters.
    pub fn select(&mut self, contact: &ContactId) -> Result<(), DirectoryError> {
        if !self.is_known(contact) {
            return Err(DirectoryError::UnknownContact(contact.clone()));
        }
        self.selected = Some(contact.clone());
        self.unread.reset(contact);
        Ok(())
    }

    /// Close the open conversation (back action on small screens).
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ContactId> {
        self.selected.as_ref()
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        let selected = self.selected.as_ref()?;
        self.contacts.iter().find(|c| &c.id == selected)
    }

    /// Count a newly arrived message against its sender, unless that
    /// conversation is already open (then it counts as seen).
    pub fn on_message_arrived(&mut self, message: &MessageRecord) {
        if self.selected.as_ref() == Some(&message.sender) {
            return;
        }
        if !self.is_known(&message.sender) {
            debug!(sender = %message.sender, "Message from unknown sender, not counted");
            return;
        }
        self.unread.increment(&message.sender);
    }

    /// Membership test against the live presence set.
    pub fn presence_label(&self, contact: &ContactId) -> Presence {
        if self.online.contains(contact) {
            Presence::Online
        } else {
            Presence::Offline
        }
    }

    pub fn unread_count(&self, contact: &ContactId) -> u64 {
        self.unread.count(contact)
    }

    pub fn total_unread(&self) -> u64 {
        self.unread.total()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    fn is_known(&self, contact: &ContactId) -> bool {
        self.contacts.iter().any(|c| &c.id == contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use voxa_shared::types::{MessageId, MessageRecord};

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            display_name: name.to_string(),
            avatar: None,
            bio: None,
            last_known: Presence::Offline,
        }
    }

    fn message_from(id: &str) -> MessageRecord {
        MessageRecord {
            id: MessageId::new(),
            sender: ContactId::new(id),
            body: Some("hi".to_string()),
            attachment: None,
            timestamp: Utc::now(),
        }
    }

    fn directory() -> ContactDirectory {
        let mut dir = ContactDirectory::new();
        dir.sync_contacts(vec![
            contact("a", "Annika"),
            contact("b", "Bram"),
            contact("c", "Joanne"),
        ]);
        dir
    }

    #[test]
    fn test_empty_query_returns_full_list_in_order() {
        let dir = directory();
        let names: Vec<&str> = dir
            .visible_contacts()
            .iter()
            .map(|c| c.display_name.as_str())
            .collect();
        assert_eq!(names, ["Annika", "Bram", "Joanne"]);
    }

    #[test]
    fn test_query_filters_case_insensitively_preserving_order() {
        let mut dir = directory();
        dir.set_query("ANN");
        let names: Vec<&str> = dir
            .visible_contacts()
            .iter()
            .map(|c| c.display_name.as_str())
            .collect();
        assert_eq!(names, ["Annika", "Joanne"]);

        dir.set_query("");
        assert_eq!(dir.visible_contacts().len(), 3);
    }

    #[test]
    fn test_select_resets_unread_to_zero() {
        let mut dir = directory();
        dir.on_message_arrived(&message_from("a"));
        dir.on_message_arrived(&message_from("a"));
        dir.on_message_arrived(&message_from("b"));
        assert_eq!(dir.unread_count(&ContactId::new("a")), 2);

        dir.select(&ContactId::new("a")).unwrap();
        assert_eq!(dir.unread_count(&ContactId::new("a")), 0);
        assert_eq!(dir.unread_count(&ContactId::new("b")), 1);
        assert_eq!(dir.selected(), Some(&ContactId::new("a")));
    }

    #[test]
    fn test_select_unknown_contact_is_rejected() {
        let mut dir = directory();
        let err = dir.select(&ContactId::new("ghost")).unwrap_err();
        assert_eq!(err, DirectoryError::UnknownContact(ContactId::new("ghost")));
        assert_eq!(dir.selected(), None);
        assert_eq!(dir.unread_count(&ContactId::new("ghost")), 0);
    }

    #[test]
    fn test_messages_from_selected_contact_stay_seen() {
        let mut dir = directory();
        dir.select(&ContactId::new("b")).unwrap();
        dir.on_message_arrived(&message_from("b"));
        assert_eq!(dir.unread_count(&ContactId::new("b")), 0);

        dir.on_message_arrived(&message_from("a"));
        assert_eq!(dir.unread_count(&ContactId::new("a")), 1);
    }

    #[test]
    fn test_unknown_senders_are_not_counted() {
        let mut dir = directory();
        dir.on_message_arrived(&message_from("ghost"));
        assert_eq!(dir.unread_count(&ContactId::new("ghost")), 0);
        assert_eq!(dir.total_unread(), 0);
    }

    #[test]
    fn test_presence_follows_feed_snapshots_and_deltas() {
        let mut dir = directory();
        let a = ContactId::new("a");
        assert_eq!(dir.presence_label(&a), Presence::Offline);

        dir.contact_online(a.clone());
        assert_eq!(dir.presence_label(&a), Presence::Online);

        dir.sync_presence([ContactId::new("b")]);
        assert_eq!(dir.presence_label(&a), Presence::Offline);
        assert_eq!(dir.presence_label(&ContactId::new("b")), Presence::Online);

        dir.contact_offline(&ContactId::new("b"));
        assert_eq!(dir.presence_label(&ContactId::new("b")), Presence::Offline);
    }

    #[test]
    fn test_contact_resync_prunes_counters_and_selection() {
        let mut dir = directory();
        dir.select(&ContactId::new("c")).unwrap();
        dir.on_message_arrived(&message_from("a"));

        dir.sync_contacts(vec![contact("b", "Bram")]);
        assert_eq!(dir.unread_count(&ContactId::new("a")), 0);
        assert_eq!(dir.total_unread(), 0);
        assert_eq!(dir.selected(), None);
    }

    #[test]
    fn test_selected_contact_lookup() {
        let mut dir = directory();
        assert!(dir.selected_contact().is_none());
        dir.select(&ContactId::new("b")).unwrap();
        assert_eq!(dir.selected_contact().unwrap().display_name, "Bram");
        dir.clear_selection();
        assert!(dir.selected_contact().is_none());
    }
}
