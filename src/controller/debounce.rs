use std::time::{Duration, Instant};

/// Quiet period the editor waits after the last edit before re-analysing.
pub const ANALYSIS_DEBOUNCE: Duration = Duration::from_millis(300);

/// Trailing-edge debouncer with injected time.
///
/// Every [`Debouncer::trigger`] restarts the quiet period; [`Debouncer::poll`] fires once the
/// period has elapsed since the latest trigger, then disarms until the next trigger.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    last_trigger: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(ANALYSIS_DEBOUNCE)
    }
}

impl Debouncer {
    /// Debouncer with a quiet period of `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_trigger: None,
        }
    }

    /// Configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an event at `now`, postponing any pending fire.
    pub fn trigger(&mut self, now: Instant) {
        self.last_trigger = Some(now);
    }

    /// True when a trigger is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.last_trigger.is_some()
    }

    /// Time left until the pending trigger fires, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last_trigger
            .map(|t| self.delay.saturating_sub(now.saturating_duration_since(t)))
    }

    /// Fire (returning true) when the quiet period has elapsed since the last trigger.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_trigger {
            Some(t) if now.saturating_duration_since(t) >= self.delay => {
                self.last_trigger = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending trigger.
    pub fn cancel(&mut self) {
        self.last_trigger = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/debounce.rs"]
mod tests;
