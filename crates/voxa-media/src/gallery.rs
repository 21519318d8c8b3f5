//! Shared-media derivation.

use voxa_shared::types::{MediaRef, MessageRecord};

/// Every media attachment in the conversation, in message arrival order.
///
/// Pure and idempotent: recompute it whenever the message log changes
/// (append or full resync) instead of patching a cached copy — the result
/// is always exactly the attachment-bearing subset of the log.
pub fn shared_media(messages: &[MessageRecord]) -> Vec<MediaRef> {
    messages
        .iter()
        .filter_map(|message| message.attachment.clone())
        .collect()
}
