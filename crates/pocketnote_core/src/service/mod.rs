//! Use-case services orchestrating the store and device ports.
//!
//! # Responsibility
//! - Wire device interactions (capture, gallery, playback, share) to store
//!   mutations.
//! - Keep every failure recoverable at the operation boundary.
//!
//! # Invariants
//! - Device failures never leave a partial store mutation behind.
//! - Attachment caps are checked before any device interaction starts.

use crate::device::DeviceError;
use crate::store::note_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod capture;
pub mod playback;
pub mod share;

/// Service-level error for device-backed note operations.
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Device(DeviceError),
    /// `finish_recording` called with no recording in flight.
    NoActiveRecording,
    /// `start_recording` called while another recording is in flight.
    RecordingInProgress,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Device(err) => write!(f, "{err}"),
            Self::NoActiveRecording => write!(f, "no recording in progress"),
            Self::RecordingInProgress => write!(f, "a recording is already in progress"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Device(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DeviceError> for ServiceError {
    fn from(value: DeviceError) -> Self {
        Self::Device(value)
    }
}
