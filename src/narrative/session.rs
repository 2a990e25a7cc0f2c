use crate::{
    book::layout::ScrollLayout,
    config::BookConfig,
    foundation::{
        core::{Millis, ScrollMetrics},
        error::StoryResult,
    },
    narrative::{
        flip::{FlipEvent, FlipState, PageFlipController},
        lines::{VisibleLines, visible_lines},
        pulse::{FlipPulse, SubscriptionId},
        scroll::{ScrollMapping, map_scroll},
    },
    story::model::Story,
};

/// Scrolling further than this (in pixels) hides the "scroll to begin" hint for good.
pub const SCROLL_HINT_DISMISS_PX: f64 = 50.0;

/// Book-open progress below which the scroll hint may show.
const SCROLL_HINT_MAX_OPEN: f64 = 0.1;

/// Book-open progress below which the title overlay shows.
pub const TITLE_MAX_OPEN: f64 = 0.3;

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct NarrativeFrame {
    /// Time the frame was produced.
    pub at: Millis,
    /// Clamped scroll fraction.
    pub scroll_fraction: f64,
    /// How far the book is open.
    pub book_open_progress: f64,
    /// Scroll-derived scene.
    pub scene_index: usize,
    /// Progress through the scroll-derived scene.
    pub progress_in_scene: f64,
    /// Visible lines of `scene_index`.
    pub visible_lines: VisibleLines,
    /// Lines of the displayed scene. Equal to `visible_lines` unless a flip is still showing
    /// another scene, which then keeps the window it last had.
    pub displayed_lines: VisibleLines,
    /// Page-flip snapshot; `flip.displayed_scene` is the scene on the pages.
    pub flip: FlipState,
    /// "Scroll to begin" hint.
    pub scroll_hint_visible: bool,
    /// Title overlay over the closed book.
    pub title_visible: bool,
}

impl NarrativeFrame {
    /// Scene whose content is on the pages.
    pub fn displayed_scene(&self) -> usize {
        self.flip.displayed_scene
    }
}

/// Frame plus the flip transitions that produced it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NarrativeUpdate {
    /// Resulting frame.
    pub frame: NarrativeFrame,
    /// Flip transitions, in order.
    pub events: Vec<FlipEvent>,
}

/// Owns a story and turns scroll events and clock ticks into frames.
#[derive(Debug)]
pub struct NarrativeSession {
    story: Story,
    config: BookConfig,
    mapping: ScrollMapping,
    visible: VisibleLines,
    // Window of the scene on the pages, and which scene that is.
    shown: (usize, VisibleLines),
    flip: PageFlipController,
    hint_dismissed: bool,
}

impl NarrativeSession {
    /// Start a session at the top of the document.
    pub fn new(story: Story, config: BookConfig) -> StoryResult<Self> {
        story.validate()?;
        config.validate()?;
        let mapping = map_scroll(0.0, story.len());
        let flip =
            PageFlipController::new(mapping.scene_index, config.flip, config.open_threshold)?;
        tracing::debug!(scenes = story.len(), title = %story.title, "narrative session created");
        Ok(Self {
            story,
            config,
            mapping,
            visible: VisibleLines::EMPTY,
            shown: (mapping.scene_index, VisibleLines::EMPTY),
            flip,
            hint_dismissed: false,
        })
    }

    /// The loaded story.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Active configuration.
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Latest scroll mapping.
    pub fn mapping(&self) -> ScrollMapping {
        self.mapping
    }

    /// Subscribe to mid-flip pulses.
    pub fn subscribe_pulses<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FlipPulse) + 'static,
    {
        self.flip.subscribe(listener)
    }

    /// Drop a pulse subscription.
    pub fn unsubscribe_pulses(&mut self, id: SubscriptionId) -> bool {
        self.flip.unsubscribe(id)
    }

    /// Document height the host should lay out for this story.
    pub fn document_height(&self, viewport_height: f64) -> f64 {
        ScrollLayout::new(self.config.px_per_scene)
            .document_height(self.story.len(), viewport_height)
    }

    /// Handle a host scroll event.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, now: Millis) -> NarrativeUpdate {
        if metrics.scroll_y > SCROLL_HINT_DISMISS_PX && !self.hint_dismissed {
            tracing::trace!("scroll hint dismissed");
            self.hint_dismissed = true;
        }
        self.on_scroll_fraction(metrics.fraction(), now)
    }

    /// Handle a scroll position already normalized by the host.
    pub fn on_scroll_fraction(&mut self, scroll_fraction: f64, now: Millis) -> NarrativeUpdate {
        let mapping = map_scroll(scroll_fraction, self.story.len());

        if mapping.scene_index != self.mapping.scene_index {
            tracing::trace!(
                from = self.mapping.scene_index,
                to = mapping.scene_index,
                "scene changed, recomputing visible lines"
            );
        }
        self.mapping = mapping;
        // From scratch: the old scene's window never carries over.
        self.visible = visible_lines(
            self.story.line_count(mapping.scene_index),
            mapping.progress_in_scene,
            self.config.window_size,
        );

        let events = self
            .flip
            .observe(mapping.scene_index, mapping.book_open_progress, now);
        self.sync_shown_lines();
        NarrativeUpdate {
            frame: self.frame(now),
            events,
        }
    }

    /// Advance the flip timers to `now` (call once per animation frame).
    pub fn tick(&mut self, now: Millis) -> NarrativeUpdate {
        let events = self.flip.tick(now);
        self.sync_shown_lines();
        NarrativeUpdate {
            frame: self.frame(now),
            events,
        }
    }

    /// Current frame without advancing anything.
    pub fn frame(&self, now: Millis) -> NarrativeFrame {
        NarrativeFrame {
            at: now,
            scroll_fraction: self.mapping.scroll_fraction,
            book_open_progress: self.mapping.book_open_progress,
            scene_index: self.mapping.scene_index,
            progress_in_scene: self.mapping.progress_in_scene,
            visible_lines: self.visible,
            displayed_lines: self.shown.1,
            flip: self.flip.state(now),
            scroll_hint_visible: !self.hint_dismissed
                && self.mapping.book_open_progress < SCROLL_HINT_MAX_OPEN,
            title_visible: self.mapping.book_open_progress < TITLE_MAX_OPEN,
        }
    }

    /// Follow the displayed scene: live window when it is the scroll scene, frozen otherwise.
    fn sync_shown_lines(&mut self) {
        let displayed = self.flip.displayed_scene();
        if displayed == self.mapping.scene_index {
            self.shown = (displayed, self.visible);
        } else if self.shown.0 != displayed {
            // Swapped onto a scene the reader has already scrolled past (or not reached yet)
            // while a newer target is pending.
            let progress = if displayed < self.mapping.scene_index {
                1.0
            } else {
                0.0
            };
            let lines = visible_lines(
                self.story.line_count(displayed),
                progress,
                self.config.window_size,
            );
            self.shown = (displayed, lines);
        }
    }

    /// Release the flip timers. Call when the host view goes away.
    pub fn teardown(&mut self) {
        self.flip.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/session.rs"]
mod tests;
