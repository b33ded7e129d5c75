//! Scheduling around the pure engine: debounced re-analysis, stale-result suppression and
//! input deduplication.

/// Trailing-edge debouncer.
pub mod debounce;
/// Stable fingerprints of analysis inputs.
pub mod fingerprint;
/// Request generations and the retained analysis.
pub mod session;
