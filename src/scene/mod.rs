//! Scene snapshot model and the editor-preset builder.

/// Snapshot builder with the editor's presets.
pub mod dsl;
/// Boundary scene model (JSON-facing).
pub mod model;
