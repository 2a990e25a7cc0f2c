//! Scroll fraction to narrative position.
//!
//! The document is split into three bands: the first 10% opens the book, the middle 80% walks
//! through the scenes, the final 10% closes the book again. Everything here is a pure function
//! of its inputs.

use crate::foundation::core::clamp01;

/// End of the opening band.
pub const OPEN_BAND_END: f64 = 0.1;
/// Start of the closing band.
pub const CLOSE_BAND_START: f64 = 0.9;

/// Narrative position derived from one scroll fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollMapping {
    /// Input fraction after clamping.
    pub scroll_fraction: f64,
    /// How far the book is open, `[0, 1]`.
    pub book_open_progress: f64,
    /// Middle band re-normalized to `[0, 1]`.
    pub story_progress: f64,
    /// Active scene, `[0, total_scenes - 1]` (or `0` for an empty story).
    pub scene_index: usize,
    /// Progress through the active scene's sub-range, `[0, 1]`.
    pub progress_in_scene: f64,
}

/// Book-open progress: linear ramp up, plateau, linear ramp down.
pub fn book_open_progress(scroll_fraction: f64) -> f64 {
    let p = clamp01(scroll_fraction);
    if p < OPEN_BAND_END {
        clamp01(p / OPEN_BAND_END)
    } else if p > CLOSE_BAND_START {
        // 1 - (p - 0.9) * 10, written so that p == 1 lands exactly on 0.
        clamp01((1.0 - p) / (1.0 - CLOSE_BAND_START))
    } else {
        1.0
    }
}

/// The middle band of the document re-normalized to `[0, 1]`.
pub fn story_progress(scroll_fraction: f64) -> f64 {
    let p = clamp01(scroll_fraction);
    clamp01((p - OPEN_BAND_END) / (CLOSE_BAND_START - OPEN_BAND_END))
}

/// Map a scroll fraction onto the story.
pub fn map_scroll(scroll_fraction: f64, total_scenes: usize) -> ScrollMapping {
    let scroll_fraction = clamp01(scroll_fraction);
    let book_open_progress = book_open_progress(scroll_fraction);
    let story_progress = story_progress(scroll_fraction);

    if total_scenes == 0 {
        return ScrollMapping {
            scroll_fraction,
            book_open_progress,
            story_progress,
            scene_index: 0,
            progress_in_scene: 0.0,
        };
    }

    let n = total_scenes as f64;
    let scene_index = ((story_progress * n).floor() as usize).min(total_scenes - 1);
    // (story - idx/n) / (1/n), clamped against overshoot at scene boundaries.
    let progress_in_scene = clamp01(story_progress * n - scene_index as f64);

    ScrollMapping {
        scroll_fraction,
        book_open_progress,
        story_progress,
        scene_index,
        progress_in_scene,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/scroll.rs"]
mod tests;
