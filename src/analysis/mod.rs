//! The analysis engine: signal extraction over a rasterized scene, scoring, and the entry
//! points tying them to a [`crate::render::Rasterizer`].

/// Engine entry points.
pub mod engine;
/// Signal extractors.
pub mod extract;
/// Findings, penalties and the overall score.
pub mod score;
/// Heuristic thresholds and penalties.
pub mod thresholds;
