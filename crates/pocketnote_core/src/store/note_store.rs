//! Note store over an injected key-value persistence port.
//!
//! # Responsibility
//! - Provide create/update/delete/toggle/attach/reorder operations.
//! - Write the full JSON snapshot on every successful mutation.
//! - Fall back to an empty collection when the persisted blob is missing or
//!   corrupt.
//!
//! # Invariants
//! - `created_at` and `id` are never changed by any operation.
//! - A failed snapshot write rolls the in-memory mutation back, so memory and
//!   storage never diverge silently.
//! - Attachment caps are enforced before mutation, never by truncation.

use crate::model::note::{AttachmentKind, CapacityExceeded, Link, Note, NoteId, NotePatch};
use crate::storage::kv::KeyValueStore;
use crate::storage::snapshot::{decode_notes, encode_notes, SNAPSHOT_KEY};
use crate::storage::StorageError;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for note mutations and persistence.
#[derive(Debug)]
pub enum StoreError {
    NotFound(NoteId),
    Capacity(CapacityExceeded),
    DuplicateId(NoteId),
    /// Attachment/link index outside the current list.
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    /// Reorder input is not a permutation of the stored IDs.
    InvalidReorder(String),
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Capacity(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "note id already in store: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of {len}")
            }
            Self::InvalidReorder(message) => write!(f, "invalid reorder: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Capacity(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CapacityExceeded> for StoreError {
    fn from(value: CapacityExceeded) -> Self {
        Self::Capacity(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Owner of the note collection, persisting through an injected port.
///
/// Single logical writer: all mutation entry points go through `&mut self`,
/// matching the serial UI event queue that drives them.
pub struct NoteStore<S: KeyValueStore> {
    kv: S,
    notes: Vec<Note>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Opens the store, loading the persisted snapshot.
    ///
    /// A missing, corrupt, or unreadable snapshot is recovered by starting
    /// from an empty collection; the failure is logged, never fatal.
    pub fn open(kv: S) -> Self {
        let notes = match kv.get(SNAPSHOT_KEY) {
            Ok(Some(payload)) => match decode_notes(&payload) {
                Ok(notes) => {
                    info!(
                        "event=store_load module=store status=ok count={}",
                        notes.len()
                    );
                    notes
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=error fallback=empty error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=store_load module=store status=ok count=0 reason=no_snapshot");
                Vec::new()
            }
            Err(err) => {
                warn!("event=store_load module=store status=error fallback=empty error={err}");
                Vec::new()
            }
        };

        Self { kv, notes }
    }

    /// Read access to the full collection in stored order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Gets one note by stable ID.
    pub fn get_note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Creates a new note with the given title (blank titles are allowed,
    /// drafts start empty) and persists the snapshot.
    pub fn create_note(&mut self, title: impl Into<String>) -> StoreResult<Note> {
        self.insert_note(Note::new(title))
    }

    /// Inserts a fully-formed note, used by import paths and tests.
    ///
    /// Rejects duplicate IDs and invariant-violating notes before mutating.
    pub fn insert_note(&mut self, note: Note) -> StoreResult<Note> {
        note.validate()?;
        if self.get_note(note.id).is_some() {
            return Err(StoreError::DuplicateId(note.id));
        }

        self.notes.push(note.clone());
        if let Err(err) = self.persist() {
            self.notes.pop();
            return Err(err);
        }
        Ok(note)
    }

    /// Applies a validated partial update to one note.
    pub fn update_note(&mut self, id: NoteId, patch: &NotePatch) -> StoreResult<Note> {
        self.mutate(id, |note| note.apply_patch(patch).map_err(Into::into))
    }

    /// Removes one note entirely (no soft delete, no undo).
    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<Note> {
        let index = self.index_of(id)?;
        let removed = self.notes.remove(index);
        if let Err(err) = self.persist() {
            self.notes.insert(index, removed);
            return Err(err);
        }
        Ok(removed)
    }

    /// Flips the completed flag.
    pub fn toggle_completed(&mut self, id: NoteId) -> StoreResult<Note> {
        self.mutate(id, |note| {
            note.completed = !note.completed;
            Ok(())
        })
    }

    /// Appends one voice note URI, rejecting with `Capacity` at the limit.
    pub fn attach_audio(&mut self, id: NoteId, uri: impl Into<String>) -> StoreResult<Note> {
        let uri = uri.into();
        self.mutate(id, |note| {
            note.push_attachment(AttachmentKind::Audio, uri)
                .map_err(Into::into)
        })
    }

    /// Appends one image URI, rejecting with `Capacity` at the limit.
    pub fn attach_image(&mut self, id: NoteId, uri: impl Into<String>) -> StoreResult<Note> {
        let uri = uri.into();
        self.mutate(id, |note| {
            note.push_attachment(AttachmentKind::Image, uri)
                .map_err(Into::into)
        })
    }

    /// Removes one attachment by position, preserving the rest in order.
    pub fn remove_attachment(
        &mut self,
        id: NoteId,
        kind: AttachmentKind,
        index: usize,
    ) -> StoreResult<Note> {
        self.mutate(id, |note| {
            let len = note.attachments(kind).len();
            note.remove_attachment(kind, index)
                .map(|_| ())
                .ok_or(StoreError::IndexOutOfRange { index, len })
        })
    }

    /// Appends one link reference.
    pub fn add_link(&mut self, id: NoteId, link: Link) -> StoreResult<Note> {
        self.mutate(id, |note| {
            note.links.push(link);
            Ok(())
        })
    }

    /// Removes one link by position.
    pub fn remove_link(&mut self, id: NoteId, index: usize) -> StoreResult<Note> {
        self.mutate(id, |note| {
            if index >= note.links.len() {
                return Err(StoreError::IndexOutOfRange {
                    index,
                    len: note.links.len(),
                });
            }
            note.links.remove(index);
            Ok(())
        })
    }

    /// Replaces the display order with the given ID sequence.
    ///
    /// The sequence must be a permutation of the stored IDs.
    pub fn reorder(&mut self, ids: &[NoteId]) -> StoreResult<()> {
        if ids.len() != self.notes.len() {
            return Err(StoreError::InvalidReorder(format!(
                "expected {} ids, got {}",
                self.notes.len(),
                ids.len()
            )));
        }
        let unique: HashSet<&NoteId> = ids.iter().collect();
        if unique.len() != ids.len() {
            return Err(StoreError::InvalidReorder(
                "id sequence contains duplicates".to_string(),
            ));
        }

        let mut reordered = Vec::with_capacity(ids.len());
        for id in ids {
            let note = self
                .get_note(*id)
                .ok_or(StoreError::NotFound(*id))?
                .clone();
            reordered.push(note);
        }

        let previous = std::mem::replace(&mut self.notes, reordered);
        if let Err(err) = self.persist() {
            self.notes = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Applies `op` to a staged copy of the note, commits and persists only
    /// when both the operation and the snapshot write succeed.
    fn mutate(
        &mut self,
        id: NoteId,
        op: impl FnOnce(&mut Note) -> StoreResult<()>,
    ) -> StoreResult<Note> {
        let index = self.index_of(id)?;
        let mut staged = self.notes[index].clone();
        op(&mut staged)?;

        let previous = std::mem::replace(&mut self.notes[index], staged.clone());
        if let Err(err) = self.persist() {
            self.notes[index] = previous;
            return Err(err);
        }
        Ok(staged)
    }

    fn index_of(&self, id: NoteId) -> StoreResult<usize> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn persist(&mut self) -> StoreResult<()> {
        let payload = encode_notes(&self.notes)?;
        match self.kv.set(SNAPSHOT_KEY, &payload) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok count={}",
                    self.notes.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=store_save module=store status=error error={err}");
                Err(err.into())
            }
        }
    }
}
