//! Shared-media gallery command handlers.

use serde::Serialize;

use voxa_media::shared_media;
use voxa_shared::types::MediaRef;

use crate::state::SharedState;

/// The gallery grid: attachment references in message arrival order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDto {
    pub items: Vec<String>,
    pub item_count: usize,
}

/// Enlarged-view modal state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaViewerDto {
    pub open: bool,
    pub selected: Option<String>,
}

/// Derive the gallery from the current message log.
pub fn gallery(state: &SharedState) -> Result<GalleryDto, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let items: Vec<String> = shared_media(&guard.messages)
        .into_iter()
        .map(|media| media.to_string())
        .collect();
    let item_count = items.len();
    Ok(GalleryDto { items, item_count })
}

/// Show one gallery item enlarged.
pub fn open_media(state: &SharedState, reference: String) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.viewer.open(MediaRef::new(reference));
    Ok(())
}

/// Close the enlarged view.
pub fn dismiss_media(state: &SharedState) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.viewer.dismiss();
    Ok(())
}

/// Snapshot the modal state for rendering.
pub fn media_viewer(state: &SharedState) -> Result<MediaViewerDto, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    Ok(MediaViewerDto {
        open: guard.viewer.is_open(),
        selected: guard.viewer.selected().map(|media| media.to_string()),
    })
}
