//! # voxa-client
//!
//! Orchestrates the Voxa client core: one shared [`state::AppState`], a
//! bridge task applying directory/presence/message pushes, command handlers
//! for the UI layer, and an outgoing event channel the UI re-renders from.
//!
//! The UI shell and the real backend are external: the backend implements
//! [`voxa_auth::AuthService`] and feeds [`feed::FeedEvent`]s; the shell
//! drains [`events::UiEvent`]s and calls the functions in [`commands`].

pub mod commands;
pub mod config;
pub mod events;
pub mod feed;
pub mod state;

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ClientConfig;
use crate::events::{EventReceiver, UiEvent};
use crate::feed::FeedEvent;
use crate::state::{AppState, SharedState};

/// Install the tracing subscriber with per-crate default filters.
///
/// `RUST_LOG` overrides everything, as usual.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("voxa_client=debug,voxa_auth=debug,voxa_directory=info,voxa_media=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Handles for one running client session.
pub struct Client {
    /// Shared state for the command handlers.
    pub state: SharedState,
    /// Where the backend adapter pushes directory/presence/message events.
    pub feed: mpsc::Sender<FeedEvent>,
    /// Where the UI layer receives [`UiEvent`]s from.
    pub ui_events: EventReceiver,
}

/// Wire up a client session: shared state, the UI event channel, and the
/// feed bridge task.  Must be called inside a tokio runtime.
pub fn start(config: &ClientConfig) -> Client {
    tracing::info!(server = %config.server_url, "Starting Voxa client core");

    let mut app_state = AppState::new();
    app_state.server_url = config.server_url.clone();
    let state: SharedState = Arc::new(Mutex::new(app_state));

    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let feed = feed::spawn_feed_bridge(state.clone(), ui_tx, config.feed_buffer);

    Client {
        state,
        feed,
        ui_events: ui_rx,
    }
}
