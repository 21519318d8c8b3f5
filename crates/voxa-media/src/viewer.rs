//! Enlarged-view modal state.

use serde::Serialize;

use voxa_shared::types::MediaRef;

/// Transient state of the enlarged media view.
///
/// Coupled to the gallery output only in that `open` receives one of its
/// references; dismissing clears both fields so no stale selection
/// survives the modal.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaViewer {
    open: bool,
    selected: Option<MediaRef>,
}

impl MediaViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `media` enlarged.
    pub fn open(&mut self, media: MediaRef) {
        self.open = true;
        self.selected = Some(media);
    }

    /// Close the modal and forget the selection.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&MediaRef> {
        self.selected.as_ref()
    }
}
