//! Shared primitives: canvas geometry, colors, error taxonomy and color math.

/// Canvas, colors and re-exported `kurbo` geometry.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Luminance, contrast and color distance.
pub mod math;
