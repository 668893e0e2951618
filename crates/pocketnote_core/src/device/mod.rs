//! Narrow contracts for device collaborators.
//!
//! # Responsibility
//! - Define the ports the core depends on for recording, playback, gallery
//!   access and sharing.
//!
//! # Invariants
//! - Core never touches native APIs; shells implement these traits.
//! - Port failures are recoverable: they surface as user-visible notices and
//!   never mutate the store.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Failure raised by a device port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// Access to a device capability was refused (e.g. microphone, gallery).
    /// The feature stays unavailable for the session; nothing else breaks.
    PermissionDenied(String),
    /// Recording or playback failed.
    Media(String),
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied(feature) => write!(f, "permission denied: {feature}"),
            Self::Media(message) => write!(f, "media failure: {message}"),
        }
    }
}

impl Error for DeviceError {}

/// Microphone capture port. `stop` yields the URI of the recorded clip.
pub trait MediaRecorder {
    fn start(&mut self) -> DeviceResult<()>;
    fn stop(&mut self) -> DeviceResult<String>;
}

/// Audio playback port, addressed by clip URI.
pub trait MediaPlayer {
    fn load(&mut self, uri: &str) -> DeviceResult<()>;
    fn play(&mut self) -> DeviceResult<()>;
    fn pause(&mut self) -> DeviceResult<()>;
    fn stop(&mut self) -> DeviceResult<()>;
}

/// Gallery picker port. Returns `None` when the user cancels.
pub trait GalleryPicker {
    fn pick_image(&mut self) -> DeviceResult<Option<String>>;
}

/// Share/export port taking composed text plus file references.
pub trait ShareSink {
    fn share(&mut self, text: &str, files: &[String]) -> DeviceResult<()>;
}
