use crate::audio::backend::{AudioBackend, AudioOpts, Channel, PlayRequest, PlaybackError};

/// Background track state as shown on the music toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicState {
    /// Not started yet.
    #[default]
    Idle,
    Playing,
    /// Paused by the reader, or autoplay was blocked.
    Paused,
    /// The track could not be loaded; the toggle does nothing.
    Unavailable,
}

/// Looping background music with a play/pause toggle.
#[derive(Clone, Debug)]
pub struct BackgroundMusic {
    request: PlayRequest,
    autoplay: bool,
    state: MusicState,
}

impl BackgroundMusic {
    pub fn new(opts: &AudioOpts) -> Self {
        Self {
            request: PlayRequest {
                path: opts.music_path.clone(),
                volume: opts.music_volume,
                looped: true,
            },
            autoplay: opts.autoplay,
            state: MusicState::Idle,
        }
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    /// Load the track and start it when autoplay is on.
    pub fn start(&mut self, backend: &mut dyn AudioBackend) -> MusicState {
        if !backend.probe(&self.request.path) {
            tracing::warn!(path = %self.request.path, "background music not found");
            self.state = MusicState::Unavailable;
            return self.state;
        }
        self.state = if self.autoplay {
            self.play(backend)
        } else {
            MusicState::Paused
        };
        self.state
    }

    /// Flip between playing and paused. A tap counts as a user gesture.
    pub fn toggle(&mut self, backend: &mut dyn AudioBackend) -> MusicState {
        backend.user_gesture();
        self.state = match self.state {
            MusicState::Unavailable => MusicState::Unavailable,
            MusicState::Playing => {
                backend.pause(Channel::Music);
                MusicState::Paused
            }
            MusicState::Idle | MusicState::Paused => self.play(backend),
        };
        self.state
    }

    /// Pause on teardown.
    pub fn stop(&mut self, backend: &mut dyn AudioBackend) {
        if self.state == MusicState::Playing {
            backend.pause(Channel::Music);
            self.state = MusicState::Paused;
        }
    }

    fn play(&self, backend: &mut dyn AudioBackend) -> MusicState {
        match backend.play(Channel::Music, &self.request) {
            Ok(()) => MusicState::Playing,
            Err(PlaybackError::Blocked(_)) => {
                tracing::info!("autoplay blocked, music waits for the reader");
                MusicState::Paused
            }
            Err(e @ PlaybackError::Missing(_)) => {
                tracing::warn!(error = %e, "background music unavailable");
                MusicState::Unavailable
            }
            Err(e) => {
                tracing::warn!(error = %e, "background music failed to play");
                MusicState::Paused
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/music.rs"]
mod tests;
