use crate::{
    audio::backend::{AudioBackend, AudioOpts, Channel, PlayRequest, PlaybackError},
    book::layout::PAGE_CONTENT_MIN_OPEN,
    narrative::session::NarrativeFrame,
    story::model::Story,
};

/// Narration file for one line, relative to the asset root.
pub fn voice_path(voice_dir: &str, scene_id: u32, line_index: usize) -> String {
    format!(
        "{}/scene-{scene_id}-line-{line_index}.mp3",
        voice_dir.trim_end_matches('/')
    )
}

/// A narrated line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct VoiceKey {
    pub scene_id: u32,
    pub line_index: usize,
}

/// Per-line narration; at most one clip plays at a time.
#[derive(Clone, Debug)]
pub struct VoicePlayer {
    dir: String,
    volume: f64,
    current: Option<VoiceKey>,
    // Newest line handed to `follow`, so each reveal is voiced once.
    followed: Option<(usize, usize)>,
}

impl VoicePlayer {
    pub fn new(opts: &AudioOpts) -> Self {
        Self {
            dir: opts.voice_dir.clone(),
            volume: opts.voice_volume,
            current: None,
            followed: None,
        }
    }

    /// Start narrating a line, replacing whatever was playing. Missing files are skipped quietly.
    pub fn play(
        &mut self,
        backend: &mut dyn AudioBackend,
        scene_id: u32,
        line_index: usize,
    ) -> Option<VoiceKey> {
        self.stop(backend);
        let request = PlayRequest {
            path: voice_path(&self.dir, scene_id, line_index),
            volume: self.volume,
            looped: false,
        };
        match backend.play(Channel::Voice, &request) {
            Ok(()) => {
                let key = VoiceKey {
                    scene_id,
                    line_index,
                };
                self.current = Some(key);
                Some(key)
            }
            Err(PlaybackError::Missing(path)) => {
                tracing::debug!(%path, "no narration for line");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, scene_id, line_index, "narration failed to play");
                None
            }
        }
    }

    pub fn stop(&mut self, backend: &mut dyn AudioBackend) {
        if self.current.take().is_some() {
            backend.stop(Channel::Voice);
        }
    }

    /// The host reports that the current clip reached its end.
    pub fn finished(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<VoiceKey> {
        self.current
    }

    pub fn is_playing(&self, scene_id: u32, line_index: usize) -> bool {
        self.current
            == Some(VoiceKey {
                scene_id,
                line_index,
            })
    }

    /// Voice the newest revealed line of `frame` if it has not been voiced yet.
    ///
    /// Only runs while the pages show the scroll-derived scene; a line revealed during a flip is
    /// voiced once the flip lands. Scrolling back does not replay lines.
    pub fn follow(
        &mut self,
        backend: &mut dyn AudioBackend,
        story: &Story,
        frame: &NarrativeFrame,
    ) -> Option<VoiceKey> {
        if frame.book_open_progress <= PAGE_CONTENT_MIN_OPEN
            || frame.scene_index != frame.displayed_scene()
        {
            return None;
        }
        let newest = frame.visible_lines.newest()?;
        let fresh = match self.followed {
            Some((scene, line)) => scene != frame.scene_index || newest > line,
            None => true,
        };
        if !fresh {
            return None;
        }
        self.followed = Some((frame.scene_index, newest));
        let scene = story.scene(frame.scene_index)?;
        self.play(backend, scene.id, newest)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/voice.rs"]
mod tests;
