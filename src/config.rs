use std::path::Path;

use anyhow::Context as _;

use crate::{
    audio::backend::AudioOpts,
    book::layout::BookGeometry,
    effects::starfield::StarfieldOpts,
    foundation::error::{StoryError, StoryResult},
    narrative::flip::FlipTimings,
};

/// Tunables for a book session. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Maximum number of lines visible at once (sliding window).
    pub window_size: usize,
    /// Book-open progress at or above which scene changes animate as page flips.
    pub open_threshold: f64,
    /// Flip checkpoints.
    pub flip: FlipTimings,
    /// Scroll distance allotted to each scene, in pixels.
    pub px_per_scene: f64,
    /// Open-book dimensions.
    pub book: BookGeometry,
    /// Background starfield.
    pub starfield: StarfieldOpts,
    /// Music and narration.
    pub audio: AudioOpts,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            window_size: 4,
            open_threshold: 0.95,
            flip: FlipTimings::default(),
            px_per_scene: 500.0,
            book: BookGeometry::default(),
            starfield: StarfieldOpts::default(),
            audio: AudioOpts::default(),
        }
    }
}

impl BookConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json_str(s: &str) -> StoryResult<Self> {
        let cfg: BookConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a config JSON file.
    pub fn from_path(path: &Path) -> StoryResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check value ranges.
    pub fn validate(&self) -> StoryResult<()> {
        if self.window_size == 0 {
            return Err(StoryError::validation("window_size must be >= 1"));
        }
        if !(self.open_threshold > 0.0 && self.open_threshold <= 1.0) {
            return Err(StoryError::validation("open_threshold must be in (0, 1]"));
        }
        if !(self.px_per_scene.is_finite() && self.px_per_scene > 0.0) {
            return Err(StoryError::validation("px_per_scene must be > 0"));
        }
        self.flip.validate()?;
        self.book.validate()?;
        self.starfield.validate()?;
        self.audio.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
