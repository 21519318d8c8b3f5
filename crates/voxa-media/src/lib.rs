//! # voxa-media
//!
//! The shared-media panel: a pure derivation of attachment references from
//! the conversation's message log, plus the transient state of the
//! enlarged-view modal.

pub mod gallery;
pub mod viewer;

pub use gallery::shared_media;
pub use viewer::MediaViewer;
