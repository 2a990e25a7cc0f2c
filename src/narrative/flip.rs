//! Page-flip state machine.
//!
//! The controller watches the scene index derived from scrolling and turns changes into timed
//! page flips while the book is fully open. Time is injected: every call carries the host's
//! monotonic clock, and the two flip checkpoints are deadlines polled by
//! [`PageFlipController::tick`] (and by every [`PageFlipController::observe`]).
//!
//! ```text
//!            scene != committed && open >= threshold
//!   Idle ───────────────────────────────────────────▶ Flipping
//!    ▲                                                  │  mid deadline: displayed = target, pulse
//!    │  end deadline: committed = target                │
//!    └──────────────────────────────────────────────────┤
//!    └──────────── open < threshold (snap, no anim) ────┘
//! ```

use crate::{
    foundation::{
        core::{Millis, clamp01},
        error::{StoryError, StoryResult},
    },
    narrative::pulse::{FlipPulse, PulseBus, SubscriptionId},
};

/// Flip checkpoints, in milliseconds after the flip starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlipTimings {
    /// Content swap, when the flap is edge-on.
    pub mid_ms: u64,
    /// End of the animation.
    pub end_ms: u64,
}

impl Default for FlipTimings {
    fn default() -> Self {
        Self {
            mid_ms: 600,
            end_ms: 1200,
        }
    }
}

impl FlipTimings {
    /// Check that the checkpoints are ordered and the flip has a duration.
    pub fn validate(&self) -> StoryResult<()> {
        if self.end_ms == 0 {
            return Err(StoryError::validation("flip end_ms must be > 0"));
        }
        if self.mid_ms > self.end_ms {
            return Err(StoryError::validation("flip mid_ms must not exceed end_ms"));
        }
        Ok(())
    }
}

/// Controller phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipPhase {
    /// No animation in flight.
    #[default]
    Idle,
    /// A flip animation is running.
    Flipping,
}

/// Page turn direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipDirection {
    /// Toward later scenes; the flap turns right to left.
    Forward,
    /// Toward earlier scenes; the flap turns left to right.
    Backward,
}

impl FlipDirection {
    /// Direction of a move from scene `from` to scene `to`.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// The flip currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FlipAnimation {
    /// Turn direction.
    pub direction: FlipDirection,
    /// Scene shown when the flip started.
    pub from_scene: usize,
    /// Scene the flip lands on.
    pub to_scene: usize,
    /// Start time.
    pub started_at: Millis,
}

/// Snapshot of the controller for renderers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FlipState {
    /// Current phase.
    pub phase: FlipPhase,
    /// The flip in flight, if any.
    pub animation: Option<FlipAnimation>,
    /// Linear progress through the flip, `[0, 1]`; `0` when idle.
    pub progress: f64,
    /// Scene whose content is on the pages.
    pub displayed_scene: usize,
    /// Baseline for detecting the next transition.
    pub committed_scene: usize,
}

/// Transitions reported by the controller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FlipEvent {
    /// A flip animation began.
    Started {
        /// Origin scene.
        from_scene: usize,
        /// Target scene.
        to_scene: usize,
        /// Turn direction.
        direction: FlipDirection,
        /// Start time.
        at: Millis,
    },
    /// Mid checkpoint: the displayed content switched to the target.
    ContentSwapped {
        /// Newly displayed scene.
        scene: usize,
        /// Checkpoint time.
        at: Millis,
    },
    /// End checkpoint: back to idle.
    Finished {
        /// Newly committed scene.
        scene: usize,
        /// Checkpoint time.
        at: Millis,
    },
    /// The book started closing mid-flip; the animation was dropped.
    Abandoned {
        /// Scene snapped to.
        scene: usize,
        /// Observation time.
        at: Millis,
    },
    /// Scene changed while the book was not open; no animation.
    Snapped {
        /// Scene snapped to.
        scene: usize,
        /// Observation time.
        at: Millis,
    },
}

/// Coordinates page-flip animations with the scroll-derived scene index.
#[derive(Debug)]
pub struct PageFlipController {
    timings: FlipTimings,
    open_threshold: f64,
    committed: usize,
    displayed: usize,
    // Latest observation; drives the follow-up flip once the current one lands.
    target: usize,
    target_open: f64,
    animation: Option<FlipAnimation>,
    mid_deadline: Option<Millis>,
    end_deadline: Option<Millis>,
    pulses: PulseBus,
}

impl PageFlipController {
    /// Controller resting on `initial_scene`. Fails on unordered or zero-length timings.
    pub fn new(
        initial_scene: usize,
        timings: FlipTimings,
        open_threshold: f64,
    ) -> StoryResult<Self> {
        timings.validate()?;
        Ok(Self {
            timings,
            open_threshold,
            committed: initial_scene,
            displayed: initial_scene,
            target: initial_scene,
            target_open: 0.0,
            animation: None,
            mid_deadline: None,
            end_deadline: None,
            pulses: PulseBus::new(),
        })
    }

    /// Subscribe to mid-flip pulses.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FlipPulse) + 'static,
    {
        self.pulses.subscribe(listener)
    }

    /// Drop a pulse subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.pulses.unsubscribe(id)
    }

    /// Current phase.
    pub fn phase(&self) -> FlipPhase {
        if self.animation.is_some() {
            FlipPhase::Flipping
        } else {
            FlipPhase::Idle
        }
    }

    /// Scene whose content is on the pages.
    pub fn displayed_scene(&self) -> usize {
        self.displayed
    }

    /// Scene used as the baseline for the next transition.
    pub fn committed_scene(&self) -> usize {
        self.committed
    }

    /// Return `true` while either checkpoint is still armed.
    pub fn has_pending_timers(&self) -> bool {
        self.mid_deadline.is_some() || self.end_deadline.is_some()
    }

    /// Snapshot at time `now`.
    pub fn state(&self, now: Millis) -> FlipState {
        let progress = match self.animation {
            Some(anim) => {
                let elapsed = now.since(anim.started_at) as f64;
                clamp01(elapsed / self.timings.end_ms as f64)
            }
            None => 0.0,
        };
        FlipState {
            phase: self.phase(),
            animation: self.animation,
            progress,
            displayed_scene: self.displayed,
            committed_scene: self.committed,
        }
    }

    /// Feed the latest scroll-derived scene index and book-open progress.
    pub fn observe(
        &mut self,
        scene_index: usize,
        book_open_progress: f64,
        now: Millis,
    ) -> Vec<FlipEvent> {
        let mut events = Vec::new();
        self.target = scene_index;
        self.target_open = book_open_progress;
        self.fire_due(now, &mut events);

        let open_enough = book_open_progress >= self.open_threshold;
        match self.animation {
            Some(anim) if !open_enough => {
                self.cancel_timers();
                self.animation = None;
                self.displayed = scene_index;
                self.committed = scene_index;
                tracing::debug!(
                    from_scene = anim.from_scene,
                    to_scene = anim.to_scene,
                    scene_index,
                    "flip abandoned, book closing"
                );
                events.push(FlipEvent::Abandoned {
                    scene: scene_index,
                    at: now,
                });
            }
            Some(_) => {
                // One flip at a time; the newer target is picked up when this one lands.
            }
            None if scene_index != self.committed => {
                if open_enough {
                    self.start(scene_index, now, &mut events);
                } else {
                    self.displayed = scene_index;
                    self.committed = scene_index;
                    tracing::trace!(scene_index, "scene set without flip");
                    events.push(FlipEvent::Snapped {
                        scene: scene_index,
                        at: now,
                    });
                }
            }
            None => {}
        }
        events
    }

    /// Fire checkpoints whose deadlines are at or before `now`.
    pub fn tick(&mut self, now: Millis) -> Vec<FlipEvent> {
        let mut events = Vec::new();
        self.fire_due(now, &mut events);
        events
    }

    /// Cancel any flip in flight and release both timers.
    ///
    /// The controller stays usable; the displayed scene becomes the new baseline.
    pub fn teardown(&mut self) {
        if self.animation.take().is_some() {
            tracing::debug!(displayed = self.displayed, "flip cancelled on teardown");
        }
        self.cancel_timers();
        self.committed = self.displayed;
        self.target = self.displayed;
    }

    fn cancel_timers(&mut self) {
        self.mid_deadline = None;
        self.end_deadline = None;
    }

    fn start(&mut self, to_scene: usize, at: Millis, events: &mut Vec<FlipEvent>) {
        let anim = FlipAnimation {
            direction: FlipDirection::between(self.committed, to_scene),
            from_scene: self.committed,
            to_scene,
            started_at: at,
        };
        self.animation = Some(anim);
        self.mid_deadline = Some(at.after(self.timings.mid_ms));
        self.end_deadline = Some(at.after(self.timings.end_ms));
        tracing::debug!(
            from_scene = anim.from_scene,
            to_scene,
            direction = ?anim.direction,
            "flip started"
        );
        events.push(FlipEvent::Started {
            from_scene: anim.from_scene,
            to_scene,
            direction: anim.direction,
            at,
        });
    }

    fn fire_due(&mut self, now: Millis, events: &mut Vec<FlipEvent>) {
        // A landed flip may chain into the next one, whose checkpoints can also be due.
        while let Some(anim) = self.animation {
            let mut fired = false;

            if let Some(mid) = self.mid_deadline
                && mid <= now
            {
                self.mid_deadline = None;
                self.displayed = anim.to_scene;
                self.pulses.emit(&FlipPulse {
                    from_scene: anim.from_scene,
                    to_scene: anim.to_scene,
                    direction: anim.direction,
                    at: mid,
                });
                events.push(FlipEvent::ContentSwapped {
                    scene: anim.to_scene,
                    at: mid,
                });
                fired = true;
            }

            if let Some(end) = self.end_deadline
                && end <= now
            {
                self.cancel_timers();
                self.animation = None;
                self.displayed = anim.to_scene;
                self.committed = anim.to_scene;
                tracing::debug!(scene = anim.to_scene, "flip finished");
                events.push(FlipEvent::Finished {
                    scene: anim.to_scene,
                    at: end,
                });
                if self.target != self.committed && self.target_open >= self.open_threshold {
                    self.start(self.target, end, events);
                }
                fired = true;
            }

            if !fired {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/flip.rs"]
mod tests;
