//! Drifting, twinkling starfield behind the book.
//!
//! The simulation is frame-stepped (one [`Starfield::step`] per animation frame) and fully
//! deterministic for a seed. Mid-flip pulses add a brightness boost that decays linearly in
//! host time.

use std::{cell::RefCell, f64::consts::TAU, rc::Rc};

use crate::{
    foundation::{
        core::{Millis, clamp01},
        error::{StoryError, StoryResult},
        math::{Rng64, stable_hash64},
    },
    narrative::pulse::FlipPulse,
};

const RADIUS: (f64, f64) = (0.5, 2.0);
const OPACITY: (f64, f64) = (0.5, 1.0);
const DRIFT: (f64, f64) = (0.01, 0.06);
const TWINKLE: (f64, f64) = (0.01, 0.03);

/// Starfield tunables.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarfieldOpts {
    pub star_count: usize,
    /// Base seed, mixed with the story title by [`Starfield::for_story`].
    pub seed: u64,
    /// Extra brightness right after a pulse, as a fraction of the remaining headroom.
    pub pulse_gain: f64,
    /// Time for a pulse to fade out completely.
    pub pulse_decay_ms: u64,
}

impl Default for StarfieldOpts {
    fn default() -> Self {
        Self {
            star_count: 300,
            seed: 0x5EED_57A2,
            pulse_gain: 0.6,
            pulse_decay_ms: 900,
        }
    }
}

impl StarfieldOpts {
    pub fn validate(&self) -> StoryResult<()> {
        if !(self.pulse_gain.is_finite() && (0.0..=1.0).contains(&self.pulse_gain)) {
            return Err(StoryError::validation("starfield pulse_gain must be in [0, 1]"));
        }
        if self.pulse_decay_ms == 0 {
            return Err(StoryError::validation("starfield pulse_decay_ms must be > 0"));
        }
        Ok(())
    }
}

/// One star.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
    /// Downward drift per frame, in pixels.
    pub speed: f64,
    /// Twinkle phase advance per frame, in radians.
    pub twinkle_speed: f64,
    pub twinkle_phase: f64,
}

impl Star {
    /// Current brightness before any pulse boost.
    pub fn brightness(&self) -> f64 {
        self.opacity * (self.twinkle_phase.sin() * 0.3 + 0.7)
    }

    /// Larger stars get a soft halo.
    pub fn has_glow(&self) -> bool {
        self.radius > 1.0
    }
}

#[derive(Debug)]
pub struct Starfield {
    width: f64,
    height: f64,
    opts: StarfieldOpts,
    stars: Vec<Star>,
    rng: Rng64,
    pulse_at: Option<Millis>,
}

impl Starfield {
    pub fn new(width: f64, height: f64, opts: StarfieldOpts) -> Self {
        let mut field = Self {
            width: width.max(0.0),
            height: height.max(0.0),
            opts,
            stars: Vec::with_capacity(opts.star_count),
            rng: Rng64::new(opts.seed),
            pulse_at: None,
        };
        for _ in 0..opts.star_count {
            let star = field.spawn();
            field.stars.push(star);
        }
        tracing::debug!(
            stars = field.stars.len(),
            width = field.width,
            height = field.height,
            "starfield created"
        );
        field
    }

    /// Starfield whose layout is stable per story title.
    pub fn for_story(title: &str, width: f64, height: f64, opts: StarfieldOpts) -> Self {
        let seed = stable_hash64(opts.seed, title);
        Self::new(width, height, StarfieldOpts { seed, ..opts })
    }

    /// Listener for [`crate::PulseBus`] subscriptions that forwards pulses to a shared field.
    pub fn pulse_listener(field: Rc<RefCell<Self>>) -> impl FnMut(&FlipPulse) + 'static {
        move |pulse| field.borrow_mut().on_pulse(pulse)
    }

    fn spawn(&mut self) -> Star {
        Star {
            x: self.rng.range(0.0, self.width),
            y: self.rng.range(0.0, self.height),
            radius: self.rng.range(RADIUS.0, RADIUS.1),
            opacity: self.rng.range(OPACITY.0, OPACITY.1),
            speed: self.rng.range(DRIFT.0, DRIFT.1),
            twinkle_speed: self.rng.range(TWINKLE.0, TWINKLE.1),
            twinkle_phase: self.rng.range(0.0, TAU),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Advance one animation frame: twinkle, drift, wrap.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for star in &mut self.stars {
            star.twinkle_phase = (star.twinkle_phase + star.twinkle_speed) % TAU;
            star.y += star.speed;
            if star.y > height {
                star.y = 0.0;
                star.x = self.rng.range(0.0, width);
            }
        }
    }

    /// Track a new viewport size. Existing stars keep their positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn on_pulse(&mut self, pulse: &FlipPulse) {
        tracing::trace!(to_scene = pulse.to_scene, at = pulse.at.0, "starfield pulse");
        self.pulse_at = Some(pulse.at);
    }

    /// Pulse boost at `now`, `[0, pulse_gain]`.
    pub fn pulse_boost(&self, now: Millis) -> f64 {
        let Some(at) = self.pulse_at else {
            return 0.0;
        };
        if now < at {
            return 0.0;
        }
        let fade = 1.0 - (now.since(at) as f64) / (self.opts.pulse_decay_ms as f64);
        self.opts.pulse_gain * clamp01(fade)
    }

    /// Brightness of `star` at `now`, including any pulse boost.
    pub fn star_brightness(&self, star: &Star, now: Millis) -> f64 {
        let base = clamp01(star.brightness());
        base + (1.0 - base) * self.pulse_boost(now)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/starfield.rs"]
mod tests;
