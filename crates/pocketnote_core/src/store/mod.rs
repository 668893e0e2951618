//! Note store: the single writer over the in-memory collection.
//!
//! # Responsibility
//! - Own the note collection and all mutation entry points.
//! - Persist a complete snapshot through the injected key-value port after
//!   every mutation.
//!
//! # Invariants
//! - On any failure the in-memory collection equals the last persisted state;
//!   no partial mutation is ever committed.
//! - Note order is caller-controlled (insertion order, or explicit reorder).

pub mod note_store;
