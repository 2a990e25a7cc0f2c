//! Audio backend seam.
//!
//! The crate never decodes or outputs sound itself. Music and narration controllers drive an
//! [`AudioBackend`]; hosts plug in their platform player. [`DryRunBackend`] resolves files on
//! disk and records what would have played, which is what the CLI and tests use.

use std::path::{Path, PathBuf};

use crate::foundation::error::{StoryError, StoryResult};

/// Audio settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioOpts {
    /// Looping background track, relative to the asset root.
    pub music_path: String,
    pub music_volume: f64,
    /// Directory holding `scene-{id}-line-{index}.mp3` narration files.
    pub voice_dir: String,
    pub voice_volume: f64,
    /// Try to start the music without a user gesture.
    pub autoplay: bool,
}

impl Default for AudioOpts {
    fn default() -> Self {
        Self {
            music_path: "sounds/background-music.mp3".to_string(),
            music_volume: 0.3,
            voice_dir: "sounds/voices".to_string(),
            voice_volume: 0.8,
            autoplay: true,
        }
    }
}

impl AudioOpts {
    pub fn validate(&self) -> StoryResult<()> {
        for (name, v) in [
            ("music_volume", self.music_volume),
            ("voice_volume", self.voice_volume),
        ] {
            if !(v.is_finite() && (0.0..=1.0).contains(&v)) {
                return Err(StoryError::validation(format!("audio {name} must be in [0, 1]")));
            }
        }
        if self.music_path.trim().is_empty() {
            return Err(StoryError::validation("audio music_path must be non-empty"));
        }
        if self.voice_dir.trim().is_empty() {
            return Err(StoryError::validation("audio voice_dir must be non-empty"));
        }
        Ok(())
    }
}

/// Why a backend refused to play.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("audio file not found: {0}")]
    Missing(String),
    #[error("playback blocked until user interaction: {0}")]
    Blocked(String),
    #[error("audio backend error: {0}")]
    Backend(String),
}

impl From<PlaybackError> for StoryError {
    fn from(e: PlaybackError) -> Self {
        StoryError::playback(e.to_string())
    }
}

/// Independent playback slots; starting a clip on a channel replaces what was there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Music,
    Voice,
}

/// One clip to start.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayRequest {
    /// Path relative to the asset root.
    pub path: String,
    pub volume: f64,
    pub looped: bool,
}

/// Platform audio player.
pub trait AudioBackend {
    /// Return `true` when `path` can be loaded.
    fn probe(&self, path: &str) -> bool;

    /// Start (or resume) `request` on `channel`.
    fn play(&mut self, channel: Channel, request: &PlayRequest) -> Result<(), PlaybackError>;

    /// Pause `channel`, keeping its position.
    fn pause(&mut self, channel: Channel);

    /// Stop `channel` and rewind.
    fn stop(&mut self, channel: Channel);

    /// The reader interacted with the page; autoplay restrictions no longer apply.
    fn user_gesture(&mut self) {}
}

/// What a [`DryRunBackend`] was asked to do.
#[derive(Clone, Debug, PartialEq)]
pub enum BackendCall {
    Play(Channel, PlayRequest),
    Pause(Channel),
    Stop(Channel),
}

/// Filesystem-backed backend that plays nothing.
#[derive(Debug)]
pub struct DryRunBackend {
    root: PathBuf,
    gesture_required: bool,
    gesture_seen: bool,
    calls: Vec<BackendCall>,
}

impl DryRunBackend {
    /// Resolve clips under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            gesture_required: false,
            gesture_seen: false,
            calls: Vec::new(),
        }
    }

    /// Refuse to play until [`AudioBackend::user_gesture`] is called, like a browser would.
    pub fn with_autoplay_blocked(mut self) -> Self {
        self.gesture_required = true;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Path of the clip on disk.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl AudioBackend for DryRunBackend {
    fn probe(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn play(&mut self, channel: Channel, request: &PlayRequest) -> Result<(), PlaybackError> {
        if !self.probe(&request.path) {
            return Err(PlaybackError::Missing(request.path.clone()));
        }
        if self.gesture_required && !self.gesture_seen {
            return Err(PlaybackError::Blocked(request.path.clone()));
        }
        self.calls.push(BackendCall::Play(channel, request.clone()));
        Ok(())
    }

    fn pause(&mut self, channel: Channel) {
        self.calls.push(BackendCall::Pause(channel));
    }

    fn stop(&mut self, channel: Channel) {
        self.calls.push(BackendCall::Stop(channel));
    }

    fn user_gesture(&mut self) {
        self.gesture_seen = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/backend.rs"]
mod tests;
