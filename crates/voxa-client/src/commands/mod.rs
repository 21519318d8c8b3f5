//! Command handlers invoked by the UI layer.
//!
//! Each sub-module groups related commands by domain.  Handlers lock the
//! shared [`crate::state::AppState`], apply the change, and map any domain
//! error to a user-visible message string.

pub mod auth;
pub mod contacts;
pub mod media;
