//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted in the snapshot.
//! - Own attachment-cap enforcement and partial-update validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is immutable after creation; `NotePatch` cannot express it.
//! - `audio_attachments` and `image_attachments` each hold at most
//!   `MAX_ATTACHMENTS_PER_KIND` entries, in insertion order.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note in the store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Hard cap on attachments of one kind per note.
///
/// Matches the limit surfaced to the user by the editor toolbar.
pub const MAX_ATTACHMENTS_PER_KIND: usize = 5;

static LOCATION_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(geo:|https?://((www\.)?(maps\.google\.[a-z.]+|google\.[a-z.]+/maps|maps\.apple\.com|openstreetmap\.org)))",
    )
    .expect("valid location url regex")
});

/// Which attachment list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// Recorded voice note URI.
    Audio,
    /// Gallery image URI.
    Image,
}

impl AttachmentKind {
    /// Stable lowercase name used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Image => "image",
        }
    }
}

/// Category of an embedded link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Regular web page.
    Website,
    /// Map/place reference.
    Location,
}

/// Website or location reference embedded in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    /// Serialized as `type` to match the persisted schema naming.
    #[serde(rename = "type")]
    pub kind: LinkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Link {
    /// Builds a link, classifying `geo:` URIs and map-service URLs as
    /// [`LinkKind::Location`] and everything else as [`LinkKind::Website`].
    pub fn detect(url: impl Into<String>, title: Option<String>) -> Self {
        let url = url.into();
        let kind = if LOCATION_URL_RE.is_match(&url) {
            LinkKind::Location
        } else {
            LinkKind::Website
        };
        Self {
            url,
            kind,
            title,
            thumbnail: None,
        }
    }
}

/// Attachment limit violation.
///
/// Raised before any mutation happens; the note is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub kind: AttachmentKind,
    pub limit: usize,
}

impl Display for CapacityExceeded {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "note already holds {} {} attachments (limit {})",
            self.limit,
            self.kind.as_str(),
            self.limit
        )
    }
}

impl Error for CapacityExceeded {}

/// Canonical note record.
///
/// Serialized field names are camelCase to stay compatible with the snapshot
/// payloads written by earlier app versions; the attachment lists additionally
/// accept the legacy `audioUris`/`imageUris` names on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable global ID used for lookups, reorders and auditing.
    pub id: NoteId,
    /// Free text, may be empty (the editor allows blank drafts).
    pub title: String,
    /// Optional free text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Vestigial toggle flag, still persisted and togglable.
    #[serde(default)]
    pub completed: bool,
    /// Voice note URIs, insertion order, at most 5.
    #[serde(default, alias = "audioUris")]
    pub audio_attachments: Vec<String>,
    /// Image URIs, insertion order, at most 5.
    #[serde(default, alias = "imageUris")]
    pub image_attachments: Vec<String>,
    /// Embedded website/location references.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Creation instant, immutable, serialized as ISO-8601.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with a generated stable ID and current timestamp.
    ///
    /// Attachments and links start empty; `completed` starts `false`.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, Utc::now())
    }

    /// Creates a note with caller-provided identity and creation instant.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            content: None,
            completed: false,
            audio_attachments: Vec::new(),
            image_attachments: Vec::new(),
            links: Vec::new(),
            created_at,
        }
    }

    /// Read access to one attachment list.
    pub fn attachments(&self, kind: AttachmentKind) -> &[String] {
        match kind {
            AttachmentKind::Audio => &self.audio_attachments,
            AttachmentKind::Image => &self.image_attachments,
        }
    }

    fn attachments_mut(&mut self, kind: AttachmentKind) -> &mut Vec<String> {
        match kind {
            AttachmentKind::Audio => &mut self.audio_attachments,
            AttachmentKind::Image => &mut self.image_attachments,
        }
    }

    /// Returns whether one more attachment of `kind` would fit.
    pub fn has_attachment_capacity(&self, kind: AttachmentKind) -> bool {
        self.attachments(kind).len() < MAX_ATTACHMENTS_PER_KIND
    }

    /// Appends one attachment at the end of its list.
    ///
    /// Rejects with [`CapacityExceeded`] when the list is full; the note is
    /// left untouched in that case.
    pub fn push_attachment(
        &mut self,
        kind: AttachmentKind,
        uri: impl Into<String>,
    ) -> Result<(), CapacityExceeded> {
        if !self.has_attachment_capacity(kind) {
            return Err(CapacityExceeded {
                kind,
                limit: MAX_ATTACHMENTS_PER_KIND,
            });
        }
        self.attachments_mut(kind).push(uri.into());
        Ok(())
    }

    /// Removes one attachment by position, preserving the order of the rest.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn remove_attachment(&mut self, kind: AttachmentKind, index: usize) -> Option<String> {
        let list = self.attachments_mut(kind);
        if index < list.len() {
            Some(list.remove(index))
        } else {
            None
        }
    }

    /// Checks per-note invariants on both attachment lists.
    pub fn validate(&self) -> Result<(), CapacityExceeded> {
        for kind in [AttachmentKind::Audio, AttachmentKind::Image] {
            if self.attachments(kind).len() > MAX_ATTACHMENTS_PER_KIND {
                return Err(CapacityExceeded {
                    kind,
                    limit: MAX_ATTACHMENTS_PER_KIND,
                });
            }
        }
        Ok(())
    }

    /// Applies a validated partial update.
    ///
    /// Mutable fields are title, content, completed, links and the attachment
    /// lists; `id` and `created_at` are not representable in the patch. An
    /// empty patched content normalizes to `None`. Attachment caps are
    /// re-checked; on violation the note is left unchanged.
    pub fn apply_patch(&mut self, patch: &NotePatch) -> Result<(), CapacityExceeded> {
        let mut staged = self.clone();
        if let Some(title) = &patch.title {
            staged.title = title.clone();
        }
        if let Some(content) = &patch.content {
            staged.content = if content.is_empty() {
                None
            } else {
                Some(content.clone())
            };
        }
        if let Some(completed) = patch.completed {
            staged.completed = completed;
        }
        if let Some(links) = &patch.links {
            staged.links = links.clone();
        }
        if let Some(audio) = &patch.audio_attachments {
            staged.audio_attachments = audio.clone();
        }
        if let Some(images) = &patch.image_attachments {
            staged.image_attachments = images.clone();
        }
        staged.validate()?;
        *self = staged;
        Ok(())
    }
}

/// Partial update for one note.
///
/// Only fields set to `Some` are applied. Identity (`id`) and `created_at`
/// are intentionally absent: they are immutable by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    /// `Some("")` clears the body.
    pub content: Option<String>,
    pub completed: Option<bool>,
    pub links: Option<Vec<Link>>,
    pub audio_attachments: Option<Vec<String>>,
    pub image_attachments: Option<Vec<String>>,
}
