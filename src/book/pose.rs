//! Cover and flap poses.
//!
//! The book is drawn flat; a rotation about the vertical axis through the spine is projected
//! as a horizontal squash by `cos(angle)` anchored at the hinge.

use crate::{
    animation::{ease::Ease, keys::Keyframes},
    book::layout::{BookGeometry, PAGE_CONTENT_MIN_OPEN},
    foundation::{
        core::{Affine, Millis, Rect, Vec2, clamp01},
        math::lerp,
    },
    narrative::{
        flip::{FlipDirection, FlipState},
        session::TITLE_MAX_OPEN,
    },
    story::model::ImagePosition,
};

/// Book-open progress at which both covers lie flat.
pub const COVERS_FLAT_AT: f64 = 0.5;

/// Duration of the cover settle transition.
pub const COVER_SETTLE_MS: u64 = 800;

/// Light sweep opacity over the flip.
const FLIP_LIGHT: [f64; 5] = [0.0, 0.4, 0.7, 0.4, 0.0];

/// Horizontal projection of a rotation by `degrees` about a vertical axis at `hinge_x`.
pub fn hinge_squash(hinge_x: f64, degrees: f64) -> Affine {
    let c = degrees.to_radians().cos();
    Affine::translate(Vec2::new(hinge_x, 0.0))
        * Affine::scale_non_uniform(c, 1.0)
        * Affine::translate(Vec2::new(-hinge_x, 0.0))
}

/// Rotation of both covers and overlay visibility, from book-open progress alone.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CoverPose {
    /// Left cover rotation in degrees, `[-90, 0]`.
    pub left_deg: f64,
    /// Right cover rotation in degrees, `[0, 90]`.
    pub right_deg: f64,
    pub content_visible: bool,
    pub title_visible: bool,
}

impl CoverPose {
    pub fn from_open_progress(book_open_progress: f64) -> Self {
        let open = clamp01(book_open_progress);
        let fold = if open < COVERS_FLAT_AT {
            (1.0 - open * 2.0) * 90.0
        } else {
            0.0
        };
        Self {
            left_deg: -fold,
            right_deg: fold,
            content_visible: open > PAGE_CONTENT_MIN_OPEN,
            title_visible: open < TITLE_MAX_OPEN,
        }
    }

    /// Pose `elapsed` into the settle transition from `from` toward `self`.
    pub fn settle_from(self, from: CoverPose, elapsed: Millis) -> Self {
        let t = Ease::COVER.apply(elapsed.0 as f64 / COVER_SETTLE_MS as f64);
        Self {
            left_deg: lerp(from.left_deg, self.left_deg, t),
            right_deg: lerp(from.right_deg, self.right_deg, t),
            ..self
        }
    }

    pub fn transform(&self, side: ImagePosition, geometry: &BookGeometry) -> Affine {
        let deg = match side {
            ImagePosition::Left => self.left_deg,
            ImagePosition::Right => self.right_deg,
        };
        hinge_squash(geometry.spine_x(), deg)
    }
}

/// The turning page of an in-flight flip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FlapPose {
    pub direction: FlipDirection,
    /// Eased turn amount, `[0, 1]`.
    pub turn: f64,
    /// Rotation in degrees: forward `0 → -180`, backward `0 → 180`.
    pub angle_deg: f64,
    /// Page the flap starts on.
    #[serde(skip)]
    pub rest: Rect,
    #[serde(skip)]
    pub transform: Affine,
    /// Past edge-on, the flap shows its back face.
    pub shows_back: bool,
    /// Opacity of the light sweep over the spread.
    pub light_opacity: f64,
}

impl FlapPose {
    /// Flap for `state`, or `None` while idle.
    pub fn from_state(state: &FlipState, geometry: &BookGeometry) -> Option<Self> {
        let anim = state.animation?;
        let turn = Ease::PAGE_TURN.apply(state.progress);
        let (sign, rest) = match anim.direction {
            FlipDirection::Forward => (-1.0, geometry.page(ImagePosition::Right)),
            FlipDirection::Backward => (1.0, geometry.page(ImagePosition::Left)),
        };
        let angle_deg = sign * 180.0 * turn;
        let light_opacity = Keyframes::evenly_spaced(&FLIP_LIGHT, Ease::InOutQuad)
            .sample(state.progress)
            .unwrap_or(0.0);

        Some(Self {
            direction: anim.direction,
            turn,
            angle_deg,
            rest,
            transform: hinge_squash(geometry.spine_x(), angle_deg),
            shows_back: angle_deg.abs() > 90.0,
            light_opacity,
        })
    }

    /// Flap outline after the transform.
    pub fn bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.rest)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/book/pose.rs"]
mod tests;
