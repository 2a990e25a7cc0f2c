use crate::{foundation::core::Millis, narrative::flip::FlipDirection};

/// Broadcast at the midpoint of every committed page flip, when the page content swaps.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FlipPulse {
    /// Scene the flip started from.
    pub from_scene: usize,
    /// Scene now shown under the flap.
    pub to_scene: usize,
    /// Turn direction.
    pub direction: FlipDirection,
    /// Time the content swapped.
    pub at: Millis,
}

/// Handle returned by [`PulseBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FlipPulse)>;

/// Explicit subscription point for flip pulses.
#[derive(Default)]
pub struct PulseBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl std::fmt::Debug for PulseBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PulseBus {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it is called synchronously, in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FlipPulse) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Return `true` when nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn emit(&mut self, pulse: &FlipPulse) {
        tracing::trace!(
            to_scene = pulse.to_scene,
            listeners = self.listeners.len(),
            "flip pulse"
        );
        for (_, listener) in &mut self.listeners {
            listener(pulse);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/pulse.rs"]
mod tests;
