//! Open-book geometry, document scroll layout, and what each page shows.

use std::ops::Range;

use crate::{
    foundation::{
        core::{Point, Rect, Rgba8},
        error::{StoryError, StoryResult},
    },
    narrative::session::NarrativeFrame,
    story::model::{ImagePosition, Line, LineKind, Scene, Story},
};

/// Book-open progress above which page content is drawn.
pub const PAGE_CONTENT_MIN_OPEN: f64 = 0.3;

/// Speaker colour when the cast has no entry for them.
pub const DEFAULT_ACCENT: Rgba8 = Rgba8::rgb(0x06, 0xB6, 0xD4);

/// Title of fact callouts.
pub const FACT_CALLOUT_TITLE: &str = "Did you know?";

/// Dimensions of the open book, in layout pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BookGeometry {
    /// Width of the open spread.
    pub width: f64,
    /// Page height.
    pub height: f64,
    /// Spine strip width, centred on the fold.
    pub spine_width: f64,
}

impl Default for BookGeometry {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 800.0,
            spine_width: 20.0,
        }
    }
}

impl BookGeometry {
    pub fn validate(&self) -> StoryResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(StoryError::validation("book width must be > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(StoryError::validation("book height must be > 0"));
        }
        let spine = self.spine_width;
        if !(spine.is_finite() && spine >= 0.0 && spine < self.width) {
            return Err(StoryError::validation("spine_width must be in [0, width)"));
        }
        Ok(())
    }

    pub fn page_width(&self) -> f64 {
        self.width / 2.0
    }

    /// x coordinate of the fold.
    pub fn spine_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Rectangle of one page.
    pub fn page(&self, side: ImagePosition) -> Rect {
        match side {
            ImagePosition::Left => Rect::new(0.0, 0.0, self.spine_x(), self.height),
            ImagePosition::Right => Rect::new(self.spine_x(), 0.0, self.width, self.height),
        }
    }

    pub fn spine(&self) -> Rect {
        let half = self.spine_width / 2.0;
        Rect::new(
            self.spine_x() - half,
            0.0,
            self.spine_x() + half,
            self.height,
        )
    }

    /// Point on the fold at mid height; covers and the flap rotate around it.
    pub fn hinge(&self) -> Point {
        Point::new(self.spine_x(), self.height / 2.0)
    }
}

/// Vertical scroll budget of the host document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollLayout {
    px_per_scene: f64,
}

impl ScrollLayout {
    pub fn new(px_per_scene: f64) -> Self {
        Self { px_per_scene }
    }

    /// One slot per scene plus a viewport of runway for opening and one for closing.
    pub fn document_height(&self, scenes: usize, viewport_height: f64) -> f64 {
        (scenes as f64) * self.px_per_scene + 2.0 * viewport_height.max(0.0)
    }
}

/// Scenes whose illustrations should be warm: one behind, two ahead.
pub fn preload_window(current: usize, total_scenes: usize) -> Range<usize> {
    let end = current.saturating_add(3).min(total_scenes);
    let start = current.saturating_sub(1).min(end);
    start..end
}

/// Display treatment of one line.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StyledLine {
    /// Index within the scene.
    pub index: usize,
    pub kind: LineKind,
    /// `"Name: "` for attributed dialogue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Prefix colour for dialogue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<Rgba8>,
    /// Heading of a callout box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callout: Option<&'static str>,
    pub italic: bool,
    pub dimmed: bool,
    pub text: String,
}

impl StyledLine {
    pub fn new(story: &Story, index: usize, line: &Line) -> Self {
        let mut styled = Self {
            index,
            kind: line.kind(),
            prefix: None,
            accent: None,
            callout: None,
            italic: false,
            dimmed: false,
            text: line.text().to_string(),
        };
        match line {
            Line::Dialogue { speaker, .. } => {
                if let Some(name) = speaker {
                    styled.prefix = Some(format!("{name}: "));
                    styled.accent = Some(story.accent_for(name).unwrap_or(DEFAULT_ACCENT));
                }
            }
            Line::Narration { .. } => styled.italic = true,
            Line::Fact { .. } => styled.callout = Some(FACT_CALLOUT_TITLE),
            Line::Stage { .. } => {
                styled.italic = true;
                styled.dimmed = true;
            }
        }
        styled
    }
}

/// What one page shows.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "content", rename_all = "snake_case")]
pub enum PageContent {
    /// Nothing (book too closed, or no scene).
    #[default]
    Blank,
    /// Scene illustration.
    Illustration {
        scene_id: u32,
        path: String,
    },
    /// Revealed lines of the displayed scene.
    Text {
        scene_id: u32,
        lines: Vec<StyledLine>,
    },
}

/// Both pages of the open book for one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PageSpread {
    pub left: PageContent,
    pub right: PageContent,
}

impl PageSpread {
    /// Resolve the pages for `frame`.
    ///
    /// Pages show the displayed scene, which lags the scroll-derived scene while a flip is in
    /// flight, so the visible range is clipped to the displayed scene's lines.
    pub fn resolve(story: &Story, frame: &NarrativeFrame) -> Self {
        if frame.book_open_progress <= PAGE_CONTENT_MIN_OPEN {
            return Self::default();
        }
        let Some(scene) = story.scene(frame.displayed_scene()) else {
            return Self::default();
        };

        let image = PageContent::Illustration {
            scene_id: scene.id,
            path: scene.image_path(),
        };
        let text = text_page(story, scene, frame);
        match scene.image_position {
            ImagePosition::Left => Self {
                left: image,
                right: text,
            },
            ImagePosition::Right => Self {
                left: text,
                right: image,
            },
        }
    }

    pub fn page(&self, side: ImagePosition) -> &PageContent {
        match side {
            ImagePosition::Left => &self.left,
            ImagePosition::Right => &self.right,
        }
    }
}

fn text_page(story: &Story, scene: &Scene, frame: &NarrativeFrame) -> PageContent {
    let visible = frame.displayed_lines.clip(scene.lines.len());
    let lines = visible
        .range()
        .filter_map(|i| scene.lines.get(i).map(|line| StyledLine::new(story, i, line)))
        .collect();
    PageContent::Text {
        scene_id: scene.id,
        lines,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/book/layout.rs"]
mod tests;
