//! thumbscore rasterizes a thumbnail composition and scores it against click-through
//! heuristics.
//!
//! The flow is strictly one-way:
//!
//! - Describe the composition as a [`Scene`] snapshot (JSON or [`SceneBuilder`])
//! - Rasterize it through a [`Rasterizer`] (by default [`CpuRasterizer`])
//! - Extract metrics and score them into an [`Analysis`] with [`run_analysis`]
//!
//! [`AnalysisSession`] and [`Debouncer`] schedule re-analysis around an editor without adding
//! state to the engine itself.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Analysis engine: extractors, scorer and entry points.
pub mod analysis;
/// Photo decoding and text layout.
pub mod assets;
/// Debounced scheduling and stale-result suppression.
pub mod controller;
/// Core value types, errors and color math.
pub mod foundation;
/// Rasterization backends and pixel buffers.
pub mod render;
/// Scene snapshot model and builder.
pub mod scene;

pub use crate::analysis::engine::{analyze_buffer, run_analysis, run_analysis_with};
pub use crate::analysis::score::{Analysis, Finding, Grade};
pub use crate::controller::debounce::{ANALYSIS_DEBOUNCE, Debouncer};
pub use crate::controller::session::{AnalysisSession, SessionOpts, Ticket};
pub use crate::foundation::core::{BrandColor, Canvas, DESIGN_HEIGHT, DESIGN_WIDTH, Rect, Rgba8};
pub use crate::foundation::error::{ThumbError, ThumbResult};
pub use crate::render::buffer::PixelBuffer;
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::export::export_png;
pub use crate::render::{RasterOpts, RasterOutput, Rasterizer};
pub use crate::scene::dsl::{SceneBuilder, TextPreset, default_scene};
pub use crate::scene::model::{ObjectFrame, ObjectKind, Scene, SceneObject};
