//! # voxa-directory
//!
//! Derives the contact sidebar from live external state: the directory's
//! contact snapshot, the presence feed, the search box, and per-contact
//! unread counters.  Everything visible is recomputed on demand from the
//! latest snapshots; nothing here caches a derived view.

pub mod directory;
pub mod unread;

pub use directory::{ContactDirectory, DirectoryError};
pub use unread::UnreadIndex;
