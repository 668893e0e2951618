//! Derived read views over the note collection.
//!
//! # Responsibility
//! - Group notes into fixed recency buckets for display.
//! - Filter notes by free-text search terms.
//!
//! # Invariants
//! - Views never mutate; they are recomputed on every read.
//! - Input order is preserved within every view result.

pub mod filter;
pub mod group;
