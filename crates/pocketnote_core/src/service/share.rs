//! Note share/export composition.
//!
//! # Responsibility
//! - Compose the plain-text export of one note.
//! - Hand text plus attachment file references to the share port.
//!
//! # Invariants
//! - Sharing never mutates the note.
//! - File references are passed in display order: images first, then voice
//!   notes.

use crate::device::{DeviceResult, ShareSink};
use crate::model::note::Note;

/// Composes the plain-text export: title, body, then a `Links:` section.
pub fn compose_share_text(note: &Note) -> String {
    let mut text = format!("{}\n\n", note.title);

    if let Some(content) = note.content.as_deref() {
        if !content.is_empty() {
            text.push_str(content);
            text.push_str("\n\n");
        }
    }

    if !note.links.is_empty() {
        text.push_str("Links:\n");
        for link in &note.links {
            let label = link.title.as_deref().unwrap_or(&link.url);
            text.push_str(&format!("- {label}\n{}\n", link.url));
        }
        text.push('\n');
    }

    text
}

/// Shares one note: composed text plus all attachment URIs as files.
pub fn share_note<K: ShareSink>(note: &Note, sink: &mut K) -> DeviceResult<()> {
    let files: Vec<String> = note
        .image_attachments
        .iter()
        .chain(note.audio_attachments.iter())
        .cloned()
        .collect();
    sink.share(&compose_share_text(note), &files)
}
