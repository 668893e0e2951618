//! JSON snapshot codec for the full note collection.
//!
//! # Responsibility
//! - Serialize the whole note sequence to one JSON string and back.
//! - Reject decoded state that violates store invariants.
//!
//! # Invariants
//! - The snapshot is always the complete collection, never a diff.
//! - Timestamps travel as ISO-8601 strings and parse back losslessly.
//! - Decoded note IDs must be unique.

use super::{StorageError, StorageResult};
use crate::model::note::Note;
use std::collections::HashSet;

/// Key the note snapshot is stored under in the key-value backend.
pub const SNAPSHOT_KEY: &str = "notes";

/// Serializes the full note collection to one JSON payload.
pub fn encode_notes(notes: &[Note]) -> StorageResult<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Parses a snapshot payload back into the note collection.
///
/// Fails when the payload is not JSON of the expected shape, when a note
/// violates the attachment caps, or when two notes share an ID. Callers treat
/// any failure as corruption and fall back to an empty collection.
pub fn decode_notes(payload: &str) -> StorageResult<Vec<Note>> {
    let notes: Vec<Note> = serde_json::from_str(payload)?;

    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        note.validate()
            .map_err(|err| StorageError::InvalidSnapshot(format!("note {}: {err}", note.id)))?;
        if !seen.insert(note.id) {
            return Err(StorageError::InvalidSnapshot(format!(
                "duplicate note id {}",
                note.id
            )));
        }
    }

    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, encode_notes};
    use crate::model::note::Note;
    use crate::storage::StorageError;

    #[test]
    fn decode_accepts_legacy_attachment_field_names() {
        let payload = r#"[{
            "id": "7f4df2d0-96a6-4ec7-9a3e-0c2f54f83a21",
            "title": "from the old app",
            "completed": false,
            "audioUris": ["rec/a.m4a"],
            "imageUris": ["img/b.jpg"],
            "links": [{"url": "https://example.com", "type": "website"}],
            "createdAt": "2024-03-01T09:30:00Z"
        }]"#;

        let notes = decode_notes(payload).expect("legacy payload should decode");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].audio_attachments, vec!["rec/a.m4a".to_string()]);
        assert_eq!(notes[0].image_attachments, vec!["img/b.jpg".to_string()]);
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let mut note = Note::new("twin");
        let twin = note.clone();
        note.title = "other twin".to_string();
        let payload = encode_notes(&[note, twin]).unwrap();
        let err = decode_notes(&payload).unwrap_err();
        assert!(matches!(err, StorageError::InvalidSnapshot(_)));
    }

    #[test]
    fn decode_rejects_over_cap_attachment_lists() {
        let payload = r#"[{
            "id": "7f4df2d0-96a6-4ec7-9a3e-0c2f54f83a21",
            "title": "too many",
            "audioAttachments": ["1","2","3","4","5","6"],
            "createdAt": "2024-03-01T09:30:00Z"
        }]"#;
        let err = decode_notes(payload).unwrap_err();
        assert!(matches!(err, StorageError::InvalidSnapshot(_)));
    }
}
