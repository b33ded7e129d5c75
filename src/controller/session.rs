use std::time::{Duration, Instant};

use crate::analysis::score::Analysis;
use crate::controller::debounce::{ANALYSIS_DEBOUNCE, Debouncer};
use crate::controller::fingerprint::{InputFingerprint, fingerprint_input};
use crate::foundation::core::BrandColor;
use crate::scene::model::Scene;

/// Session configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOpts {
    /// Quiet period after an edit before the next run.
    pub debounce: Duration,
    /// Skip runs whose input matches the last requested run.
    pub dedup: bool,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            debounce: ANALYSIS_DEBOUNCE,
            dedup: true,
        }
    }
}

/// Handle for one requested run; results are only accepted for the newest ticket.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    input: InputFingerprint,
}

impl Ticket {
    /// Request number this ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Keeps the analysis shown to the user in step with the latest edit.
///
/// Edits arm the debouncer; each run takes a [`Ticket`] from [`AnalysisSession::begin`] and hands
/// its result back through [`AnalysisSession::complete`], which drops results of superseded
/// requests.
#[derive(Clone, Debug)]
pub struct AnalysisSession {
    opts: SessionOpts,
    debouncer: Debouncer,
    generation: u64,
    latest: Option<Analysis>,
    issued_input: Option<InputFingerprint>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(SessionOpts::default())
    }
}

impl AnalysisSession {
    /// Empty session.
    pub fn new(opts: SessionOpts) -> Self {
        Self {
            opts,
            debouncer: Debouncer::new(opts.debounce),
            generation: 0,
            latest: None,
            issued_input: None,
        }
    }

    /// Record an edit at `now`.
    pub fn notify_edit(&mut self, now: Instant) {
        self.debouncer.trigger(now);
    }

    /// True once the quiet period after the last edit has elapsed; fires once per burst.
    pub fn due(&mut self, now: Instant) -> bool {
        self.debouncer.poll(now)
    }

    /// Underlying debouncer.
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// False when `scene` and `brand` match the newest issued ticket and dedup is enabled.
    ///
    /// The newest ticket is the only one whose result can be accepted, so a matching input is
    /// either already shown or about to be.
    pub fn needs_run(&self, scene: &Scene, brand: BrandColor) -> bool {
        if !self.opts.dedup {
            return true;
        }
        self.issued_input != Some(fingerprint_input(scene, brand))
    }

    /// Issue a ticket for a new run, superseding every earlier ticket.
    pub fn begin(&mut self, scene: &Scene, brand: BrandColor) -> Ticket {
        self.generation += 1;
        tracing::debug!(generation = self.generation, "analysis requested");
        let input = fingerprint_input(scene, brand);
        self.issued_input = Some(input);
        Ticket {
            generation: self.generation,
            input,
        }
    }

    /// Store `result` if `ticket` is still the newest; returns whether it was accepted.
    pub fn complete(&mut self, ticket: Ticket, result: Analysis) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale analysis"
            );
            return false;
        }
        debug_assert_eq!(self.issued_input, Some(ticket.input));
        self.latest = Some(result);
        true
    }

    /// Newest issued generation (0 before the first run).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Last accepted analysis.
    pub fn latest(&self) -> Option<&Analysis> {
        self.latest.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/session.rs"]
mod tests;
