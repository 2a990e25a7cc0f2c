pub use kurbo::{Affine, Point, Rect, Vec2};

/// Monotonic timestamp (or duration) in milliseconds, supplied by the host clock.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Time origin.
    pub const ZERO: Self = Self(0);

    /// Shift forward by `ms` milliseconds using saturating arithmetic.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier`; zero when `earlier` is in the future.
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Convert to seconds.
    pub fn as_secs_f64(self) -> f64 {
        (self.0 as f64) / 1000.0
    }
}

/// Clamp `v` into `[0, 1]`. `NaN` maps to `0`.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Raw scroll position of the host document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    /// Pixels scrolled from the top of the document.
    pub scroll_y: f64,
    /// Full document height in pixels.
    pub document_height: f64,
    /// Visible viewport height in pixels.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Build metrics from raw host values.
    pub fn new(scroll_y: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            document_height,
            viewport_height,
        }
    }

    /// Metrics positioned at `fraction` of the scrollable range.
    pub fn at_fraction(fraction: f64, document_height: f64, viewport_height: f64) -> Self {
        let mut m = Self::new(0.0, document_height, viewport_height);
        m.scroll_y = clamp01(fraction) * m.scrollable_range();
        m
    }

    /// Scrollable distance (`document - viewport`), never negative.
    pub fn scrollable_range(self) -> f64 {
        let range = self.document_height - self.viewport_height;
        if range.is_finite() { range.max(0.0) } else { 0.0 }
    }

    /// Normalized scroll position in `[0, 1]`.
    ///
    /// A document that cannot scroll reports `0`.
    pub fn fraction(self) -> f64 {
        let range = self.scrollable_range();
        if range <= 0.0 {
            return 0.0;
        }
        clamp01(self.scroll_y / range)
    }
}

/// Straight-alpha RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Component array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same colour with alpha scaled by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * clamp01(opacity)).round() as u8;
        Self { a, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
