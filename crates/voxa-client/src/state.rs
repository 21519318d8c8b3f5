//! Client session state shared across all command handlers.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` and handed to every
//! command handler and to the feed bridge.  The mutex is never held across
//! an await point; each command reads and writes inside one lock scope.

use std::sync::{Arc, Mutex};

use voxa_auth::AuthFlow;
use voxa_directory::ContactDirectory;
use voxa_media::MediaViewer;
use voxa_shared::types::{MessageRecord, Session};

/// Shared handle to the client state.
pub type SharedState = Arc<Mutex<AppState>>;

/// Central client state.
pub struct AppState {
    /// Login / signup state machine.  Gates everything else until a
    /// session exists.
    pub auth: AuthFlow,

    /// The authenticated session, if any.  Produced by `submit` and also
    /// returned to the caller, who owns navigation and storage.
    pub session: Option<Session>,

    /// Sidebar derivation: contacts, presence, query, selection, unread.
    pub directory: ContactDirectory,

    /// Message log for the open conversation, in arrival order.
    /// Append-only between resyncs; the media gallery is re-derived from
    /// this, never patched separately.
    pub messages: Vec<MessageRecord>,

    /// Enlarged-media modal state.
    pub viewer: MediaViewer,

    /// URL of the backend this client talks to.
    pub server_url: String,
}

impl AppState {
    /// Create a new, unauthenticated client state.
    pub fn new() -> Self {
        Self {
            auth: AuthFlow::new(),
            session: None,
            directory: ContactDirectory::new(),
            messages: Vec::new(),
            viewer: MediaViewer::new(),
            server_url: String::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
