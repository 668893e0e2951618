//! Voice note playback control.
//!
//! # Responsibility
//! - Track which clip is loaded and whether it is playing.
//! - Implement tap-to-toggle semantics over the playback port.
//!
//! # Invariants
//! - At most one clip is loaded at a time; switching clips stops the
//!   previous one first.

use crate::device::{DeviceResult, MediaPlayer};

/// Single-clip playback controller with tap-to-toggle semantics.
pub struct PlaybackController<P: MediaPlayer> {
    player: P,
    current: Option<String>,
    playing: bool,
}

impl<P: MediaPlayer> PlaybackController<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            current: None,
            playing: false,
        }
    }

    /// URI of the currently loaded clip, if any.
    pub fn current_uri(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Handles a tap on one clip.
    ///
    /// Tapping the loaded clip pauses or resumes it; tapping another clip
    /// stops the current one and starts the new one from the beginning.
    pub fn toggle(&mut self, uri: &str) -> DeviceResult<()> {
        if self.current.as_deref() == Some(uri) {
            if self.playing {
                self.player.pause()?;
                self.playing = false;
            } else {
                self.player.play()?;
                self.playing = true;
            }
            return Ok(());
        }

        if self.current.is_some() {
            self.player.stop()?;
            self.current = None;
            self.playing = false;
        }

        self.player.load(uri)?;
        self.player.play()?;
        self.current = Some(uri.to_string());
        self.playing = true;
        Ok(())
    }

    /// Stops playback and unloads the current clip.
    pub fn stop(&mut self) -> DeviceResult<()> {
        if self.current.is_some() {
            self.player.stop()?;
            self.current = None;
            self.playing = false;
        }
        Ok(())
    }

    /// Notification from the shell that the loaded clip finished on its own.
    pub fn on_finished(&mut self) {
        self.playing = false;
        self.current = None;
    }
}
