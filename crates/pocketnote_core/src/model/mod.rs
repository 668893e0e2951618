//! Domain model for user notes.
//!
//! # Responsibility
//! - Define the canonical note record and its embedded link/attachment shapes.
//! - Enforce per-note invariants (attachment caps, immutable identity).
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Attachment lists never exceed `MAX_ATTACHMENTS_PER_KIND` entries.
//! - `created_at` is set once at creation and never changes.

pub mod note;
