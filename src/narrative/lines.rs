use std::ops::Range;

use crate::foundation::core::clamp01;

/// Contiguous ascending run of line indices `[start, end)` currently on the page.
///
/// Serializes as the explicit index list, e.g. `[1, 2, 3, 4]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisibleLines {
    start: usize,
    end: usize,
}

impl VisibleLines {
    /// No lines visible.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Range `[start, end)`; an inverted range collapses to empty at `start`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// First visible index (inclusive).
    pub fn start(self) -> usize {
        self.start
    }

    /// One past the last visible index.
    pub fn end(self) -> usize {
        self.end
    }

    /// Number of visible lines.
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Return `true` when nothing is visible.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Return `true` when line `i` is visible.
    pub fn contains(self, i: usize) -> bool {
        self.start <= i && i < self.end
    }

    /// Most recently revealed line.
    pub fn newest(self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    /// Index range.
    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }

    /// Restrict to a scene with `line_count` lines.
    ///
    /// Renderers reading a different scene's lines than the one the range was computed
    /// for (the displayed page mid-flip) must clip first.
    pub fn clip(self, line_count: usize) -> Self {
        Self::new(self.start.min(line_count), self.end.min(line_count))
    }
}

impl serde::Serialize for VisibleLines {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.range())
    }
}

/// How many lines of a scene have been revealed at `progress_in_scene`.
pub fn lines_to_show(line_count: usize, progress_in_scene: f64) -> usize {
    let revealed = (clamp01(progress_in_scene) * line_count as f64).ceil();
    (revealed as usize).min(line_count)
}

/// Sliding window over the revealed lines: at most `window` of the newest ones.
pub fn visible_lines(line_count: usize, progress_in_scene: f64, window: usize) -> VisibleLines {
    let shown = lines_to_show(line_count, progress_in_scene);
    if shown <= window {
        VisibleLines::new(0, shown)
    } else {
        VisibleLines::new(shown - window, shown)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/lines.rs"]
mod tests;
