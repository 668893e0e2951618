//! Voice capture and gallery import use-cases.
//!
//! # Responsibility
//! - Drive the recorder start/stop cycle and attach the produced clip.
//! - Import one gallery image into a note.
//!
//! # Invariants
//! - The attachment cap is checked before the device interaction starts, so
//!   a full note never wastes a recording or a picker round-trip.
//! - A cancelled pick is a no-op, not an error.

use crate::device::{GalleryPicker, MediaRecorder};
use crate::model::note::{AttachmentKind, CapacityExceeded, Note, NoteId, MAX_ATTACHMENTS_PER_KIND};
use crate::service::ServiceError;
use crate::storage::kv::KeyValueStore;
use crate::store::note_store::{NoteStore, StoreError};
use log::info;

/// Drives one microphone recording at a time and attaches the result.
pub struct CaptureService<R: MediaRecorder> {
    recorder: R,
    active: bool,
}

impl<R: MediaRecorder> CaptureService<R> {
    pub fn new(recorder: R) -> Self {
        Self {
            recorder,
            active: false,
        }
    }

    /// Whether a recording is currently in flight.
    pub fn is_recording(&self) -> bool {
        self.active
    }

    /// Starts recording a voice note destined for `note_id`.
    ///
    /// Refuses up front when the note is unknown, already holds the maximum
    /// number of voice notes, or another recording is in flight.
    pub fn start_recording<S: KeyValueStore>(
        &mut self,
        store: &NoteStore<S>,
        note_id: NoteId,
    ) -> Result<(), ServiceError> {
        if self.active {
            return Err(ServiceError::RecordingInProgress);
        }
        ensure_attachment_capacity(store, note_id, AttachmentKind::Audio)?;

        self.recorder.start()?;
        self.active = true;
        info!("event=recording_start module=service status=ok note_id={note_id}");
        Ok(())
    }

    /// Stops the recorder and attaches the produced clip to `note_id`.
    ///
    /// The store re-checks the cap on attach, so a note filled up between
    /// start and stop still rejects cleanly with no mutation.
    pub fn finish_recording<S: KeyValueStore>(
        &mut self,
        store: &mut NoteStore<S>,
        note_id: NoteId,
    ) -> Result<Note, ServiceError> {
        if !self.active {
            return Err(ServiceError::NoActiveRecording);
        }
        self.active = false;

        let uri = self.recorder.stop()?;
        let note = store.attach_audio(note_id, uri)?;
        info!("event=recording_attach module=service status=ok note_id={note_id}");
        Ok(note)
    }

    /// Stops and discards the current recording, if any.
    pub fn cancel_recording(&mut self) -> Result<(), ServiceError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.recorder.stop()?;
        Ok(())
    }
}

/// Lets the user pick one gallery image and attaches it to `note_id`.
///
/// Returns `Ok(None)` when the pick is cancelled. The cap is checked before
/// the picker is launched.
pub fn import_image_from_gallery<S: KeyValueStore, P: GalleryPicker>(
    store: &mut NoteStore<S>,
    picker: &mut P,
    note_id: NoteId,
) -> Result<Option<Note>, ServiceError> {
    ensure_attachment_capacity(store, note_id, AttachmentKind::Image)?;

    match picker.pick_image()? {
        Some(uri) => {
            let note = store.attach_image(note_id, uri)?;
            info!("event=image_attach module=service status=ok note_id={note_id}");
            Ok(Some(note))
        }
        None => Ok(None),
    }
}

fn ensure_attachment_capacity<S: KeyValueStore>(
    store: &NoteStore<S>,
    note_id: NoteId,
    kind: AttachmentKind,
) -> Result<(), ServiceError> {
    let note = store
        .get_note(note_id)
        .ok_or(ServiceError::Store(StoreError::NotFound(note_id)))?;
    if !note.has_attachment_capacity(kind) {
        return Err(ServiceError::Store(StoreError::Capacity(
            CapacityExceeded {
                kind,
                limit: MAX_ATTACHMENTS_PER_KIND,
            },
        )));
    }
    Ok(())
}
