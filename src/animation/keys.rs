use crate::{
    animation::ease::Ease,
    foundation::error::{StoryError, StoryResult},
};

/// Values that can be interpolated between keyframes.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` at `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for crate::foundation::core::Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// One key on a normalized `[0, 1]` animation timeline.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Position on the timeline.
    pub at: f64,
    /// Value at this key.
    pub value: T,
    /// Ease applied toward the next key.
    pub ease: Ease,
}

/// Keyframe track sampled by normalized progress.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keys sorted by `at`.
    pub keys: Vec<Keyframe<T>>,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Spread `values` evenly over `[0, 1]`, all segments using `ease`.
    pub fn evenly_spaced(values: &[T], ease: Ease) -> Self {
        let last = values.len().saturating_sub(1).max(1) as f64;
        let keys = values
            .iter()
            .enumerate()
            .map(|(i, v)| Keyframe {
                at: (i as f64) / last,
                value: v.clone(),
                ease,
            })
            .collect();
        Self { keys }
    }

    /// Check that keys exist and are sorted.
    pub fn validate(&self) -> StoryResult<()> {
        if self.keys.is_empty() {
            return Err(StoryError::validation("keyframes must have at least one key"));
        }
        if !self.keys.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(StoryError::validation("keyframes must be sorted by position"));
        }
        Ok(())
    }

    /// Sample the track at progress `t`. Returns `None` for an empty track.
    pub fn sample(&self, t: f64) -> Option<T> {
        let first = self.keys.first()?;
        let idx = self.keys.partition_point(|k| k.at <= t);

        if idx == 0 {
            return Some(first.value.clone());
        }
        if idx >= self.keys.len() {
            return self.keys.last().map(|k| k.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return Some(a.value.clone());
        }
        let local = a.ease.apply((t - a.at) / span);
        Some(T::lerp(&a.value, &b.value, local))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keys.rs"]
mod tests;
