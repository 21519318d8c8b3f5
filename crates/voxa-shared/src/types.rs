use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Contact identity = opaque id assigned by the directory service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    Offline,
}

impl Presence {
    pub fn is_online(self) -> bool {
        self == Self::Online
    }

    /// Status text shown next to a contact's name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

/// Which credential path a submission takes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    /// Mode flag sent to the auth service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
        }
    }
}

/// A contact as reported by the directory service.
///
/// The directory owns this data; the client holds a read-only snapshot and
/// never edits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Unique contact identifier.
    pub id: ContactId,
    /// Name shown in the sidebar and profile header.
    pub display_name: String,
    /// Optional reference to the contact's avatar image.
    pub avatar: Option<String>,
    /// Optional profile bio.
    pub bio: Option<String>,
    /// Presence at snapshot time.  The live presence feed is authoritative
    /// once it has reported; this is the directory's last word.
    pub last_known: Presence,
}

/// Reference to a media attachment (URL or blob handle owned by the backend).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MediaRef(pub String);

impl MediaRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

impl std::fmt::Display for MediaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single chat message.  Append-only, ordered by arrival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRecord {
    /// Unique message identifier.
    pub id: MessageId,
    /// Who sent it.
    pub sender: ContactId,
    /// Text content, if any.
    pub body: Option<String>,
    /// Media attachment, if any.
    pub attachment: Option<MediaRef>,
    /// When the message was sent (as reported by the sender).
    pub timestamp: DateTime<Utc>,
}

/// An authenticated session produced by the auth service.
///
/// The client hands this to whoever drives post-auth navigation; it does
/// not interpret the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// The authenticated user's own contact id.
    pub user_id: ContactId,
    /// Opaque bearer token for subsequent backend calls.
    pub token: String,
}
