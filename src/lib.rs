//! Stellar Stories is a scroll-driven picture book engine.
//!
//! A reader scrolls a tall document; the crate turns that one number into everything the book
//! on screen needs: how far the covers are open, which scene is active, which lines of the
//! scene are revealed, and when a page flip runs.
//!
//! # Pipeline overview
//!
//! 1. **Map**: `scroll fraction -> ScrollMapping` (book-open progress, scene, progress in scene)
//! 2. **Reveal**: `ScrollMapping -> VisibleLines` (sliding window over the scene's lines)
//! 3. **Flip**: scene changes drive [`PageFlipController`], a timed state machine whose
//!    mid-flip checkpoint swaps the page content and broadcasts a [`FlipPulse`]
//! 4. **Present** (optional): [`PageSpread`], [`CoverPose`], [`FlapPose`], the [`Starfield`] and
//!    the audio controllers consume [`NarrativeFrame`]s; none of them feed back into the core
//!
//! [`NarrativeSession`] glues steps 1 to 3 together.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Injected time**: nothing reads a clock. Every call that can move a timer takes a
//!   monotonic [`Millis`] from the host, and timers are deadlines polled by `tick`.
//! - **Clamp, don't fail**: out-of-range scroll input is clamped and empty stories yield safe
//!   defaults. Only loading stories and configs can fail.
#![forbid(unsafe_code)]

mod animation;
mod audio;
mod book;
mod config;
mod effects;
mod foundation;
mod narrative;
mod story;

pub use animation::ease::Ease;
pub use animation::keys::{Keyframe, Keyframes, Lerp};
pub use audio::backend::{
    AudioBackend, AudioOpts, BackendCall, Channel, DryRunBackend, PlayRequest, PlaybackError,
};
pub use audio::music::{BackgroundMusic, MusicState};
pub use audio::voice::{VoiceKey, VoicePlayer, voice_path};
pub use book::layout::{
    BookGeometry, DEFAULT_ACCENT, FACT_CALLOUT_TITLE, PAGE_CONTENT_MIN_OPEN, PageContent,
    PageSpread, ScrollLayout, StyledLine, preload_window,
};
pub use book::pose::{COVER_SETTLE_MS, COVERS_FLAT_AT, CoverPose, FlapPose, hinge_squash};
pub use config::BookConfig;
pub use effects::raster::{BACKGROUND, render_starfield};
pub use effects::starfield::{Star, Starfield, StarfieldOpts};
pub use foundation::core::{Affine, Millis, Point, Rect, Rgba8, ScrollMetrics, Vec2, clamp01};
pub use foundation::error::{StoryError, StoryResult};
pub use foundation::math::Rng64;
pub use narrative::flip::{
    FlipAnimation, FlipDirection, FlipEvent, FlipPhase, FlipState, FlipTimings,
    PageFlipController,
};
pub use narrative::lines::{VisibleLines, lines_to_show, visible_lines};
pub use narrative::pulse::{FlipPulse, PulseBus, SubscriptionId};
pub use narrative::scroll::{
    CLOSE_BAND_START, OPEN_BAND_END, ScrollMapping, book_open_progress, map_scroll,
    story_progress,
};
pub use narrative::session::{
    NarrativeFrame, NarrativeSession, NarrativeUpdate, SCROLL_HINT_DISMISS_PX, TITLE_MAX_OPEN,
};
pub use story::builtin::{builtin_story, builtin_story_json};
pub use story::model::{CastMember, ImagePosition, Line, LineKind, Scene, Story};
