//! Core domain logic for PocketNote.
//! This crate is the single source of truth for business invariants.

pub mod device;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use device::{DeviceError, DeviceResult, GalleryPicker, MediaPlayer, MediaRecorder, ShareSink};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{
    AttachmentKind, CapacityExceeded, Link, LinkKind, Note, NoteId, NotePatch,
    MAX_ATTACHMENTS_PER_KIND,
};
pub use service::capture::{import_image_from_gallery, CaptureService};
pub use service::playback::PlaybackController;
pub use service::share::{compose_share_text, share_note};
pub use service::ServiceError;
pub use storage::kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use storage::snapshot::{decode_notes, encode_notes, SNAPSHOT_KEY};
pub use storage::{StorageError, StorageResult};
pub use store::note_store::{NoteStore, StoreError, StoreResult};
pub use view::filter::filter_notes;
pub use view::group::{bucket_for, group_by_recency, RecencyBucket};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
