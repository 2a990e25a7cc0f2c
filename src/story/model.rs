use std::{collections::BTreeMap, collections::BTreeSet, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::Rgba8,
    error::{StoryError, StoryResult},
};

/// Which physical page of the open spread hosts a scene's illustration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePosition {
    /// Illustration on the left page, text on the right.
    Left,
    /// Illustration on the right page, text on the left.
    Right,
}

impl ImagePosition {
    /// The page that carries the text.
    pub fn text_side(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One unit of displayed text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    /// Spoken line, optionally attributed to a cast member.
    Dialogue {
        /// Cast member name, if attributed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speaker: Option<String>,
        /// Display text.
        text: String,
    },
    /// Narrator voice.
    Narration {
        /// Display text.
        text: String,
    },
    /// "Did you know?" callout.
    Fact {
        /// Display text.
        text: String,
    },
    /// Stage direction.
    Stage {
        /// Display text.
        text: String,
    },
}

impl Line {
    /// Display text of any line kind.
    pub fn text(&self) -> &str {
        match self {
            Self::Dialogue { text, .. }
            | Self::Narration { text }
            | Self::Fact { text }
            | Self::Stage { text } => text,
        }
    }

    /// Speaker of a dialogue line.
    pub fn speaker(&self) -> Option<&str> {
        match self {
            Self::Dialogue { speaker, .. } => speaker.as_deref(),
            _ => None,
        }
    }

    /// Kind tag without payload.
    pub fn kind(&self) -> LineKind {
        match self {
            Self::Dialogue { .. } => LineKind::Dialogue,
            Self::Narration { .. } => LineKind::Narration,
            Self::Fact { .. } => LineKind::Fact,
            Self::Stage { .. } => LineKind::Stage,
        }
    }
}

/// Payload-free line tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// See [`Line::Dialogue`].
    Dialogue,
    /// See [`Line::Narration`].
    Narration,
    /// See [`Line::Fact`].
    Fact,
    /// See [`Line::Stage`].
    Stage,
}

/// One narrative beat: a spread with an illustration and ordered lines.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Unique id; also names the scene's media files.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Page hosting the illustration.
    pub image_position: ImagePosition,
    /// Illustration path relative to the asset root. Defaults to `images/scene{id}.png`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Lines in reveal order.
    pub lines: Vec<Line>,
}

impl Scene {
    /// Illustration path relative to the asset root.
    pub fn image_path(&self) -> String {
        self.image
            .clone()
            .unwrap_or_else(|| format!("images/scene{}.png", self.id))
    }
}

/// Cast member presentation data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CastMember {
    /// Accent colour for the speaker prefix.
    pub accent: Rgba8,
}

/// The complete static narrative dataset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Story {
    /// Book title shown while the book is closed.
    pub title: String,
    /// Subtitle shown under the title.
    #[serde(default)]
    pub subtitle: String,
    /// Speaker name -> presentation.
    #[serde(default)]
    pub cast: BTreeMap<String, CastMember>,
    /// Scenes in narrative order.
    pub scenes: Vec<Scene>,
}

impl Story {
    /// Parse and validate a story from JSON text.
    pub fn from_json_str(s: &str) -> StoryResult<Self> {
        let story: Story = serde_json::from_str(s)?;
        story.validate()?;
        Ok(story)
    }

    /// Read, parse and validate a story JSON file.
    pub fn from_path(path: &Path) -> StoryResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read story '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> StoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Return `true` when the story has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene at a narrative index.
    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Number of lines in the scene at `index`; `0` when out of range.
    pub fn line_count(&self, index: usize) -> usize {
        self.scene(index).map_or(0, |s| s.lines.len())
    }

    /// Accent colour of a speaker, if the cast lists them.
    pub fn accent_for(&self, speaker: &str) -> Option<Rgba8> {
        self.cast.get(speaker).map(|c| c.accent)
    }

    /// Check structural rules. An empty scene list is allowed.
    pub fn validate(&self) -> StoryResult<()> {
        if self.title.trim().is_empty() {
            return Err(StoryError::story("story title must be non-empty"));
        }

        let mut seen = BTreeSet::new();
        for scene in &self.scenes {
            if !seen.insert(scene.id) {
                return Err(StoryError::story(format!("duplicate scene id {}", scene.id)));
            }
            if scene.title.trim().is_empty() {
                return Err(StoryError::story(format!("scene {} has an empty title", scene.id)));
            }
            for (i, line) in scene.lines.iter().enumerate() {
                if line.text().trim().is_empty() {
                    return Err(StoryError::story(format!(
                        "scene {} line {i} has empty text",
                        scene.id
                    )));
                }
                if let Some(speaker) = line.speaker()
                    && !self.cast.is_empty()
                    && !self.cast.contains_key(speaker)
                {
                    return Err(StoryError::story(format!(
                        "scene {} line {i} references unknown speaker '{speaker}'",
                        scene.id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/model.rs"]
mod tests;
