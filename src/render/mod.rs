//! Rasterization: the [`Rasterizer`] contract, the pixel buffer it produces, the `vello_cpu`
//! backend and PNG export.

use std::path::PathBuf;

use crate::foundation::error::ThumbResult;
use crate::scene::model::Scene;

/// Immutable RGBA pixel buffer.
pub mod buffer;
/// CPU rasterizer powered by `vello_cpu`.
pub mod cpu;
/// PNG export of rasterized buffers.
pub mod export;

use buffer::PixelBuffer;

/// Environment variable naming a default font file for glyph rendering.
pub const FONT_ENV_VAR: &str = "THUMBSCORE_FONT";

/// Renders a scene snapshot to pixels.
///
/// Implementations must be deterministic for a given scene and cover the full canvas.
pub trait Rasterizer {
    /// Rasterize `scene` at its canvas resolution.
    fn rasterize(&mut self, scene: &Scene) -> ThumbResult<RasterOutput>;
}

/// Result of one rasterization.
#[derive(Clone, Debug)]
pub struct RasterOutput {
    /// Composited pixels.
    pub buffer: PixelBuffer,
    /// Ids of objects that could not be drawn and contributed no pixels.
    pub skipped: Vec<String>,
}

/// Options for [`cpu::CpuRasterizer`].
#[derive(Clone, Debug)]
pub struct RasterOpts {
    /// Directory image sources are resolved against.
    pub assets_root: PathBuf,
    /// Font used for glyph rendering; text is greeked when absent.
    pub font_path: Option<PathBuf>,
    /// Straight RGBA8 color of pixels no object covers.
    pub clear_rgba: [u8; 4],
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("."),
            font_path: None,
            clear_rgba: [0, 0, 0, 255],
        }
    }
}

impl RasterOpts {
    /// Defaults, with `font_path` taken from [`FONT_ENV_VAR`] when set.
    pub fn from_env() -> Self {
        let font_path = std::env::var_os(FONT_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            font_path,
            ..Self::default()
        }
    }

    /// Return options with a different asset root.
    pub fn with_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = root.into();
        self
    }

    /// Return options with a font file for glyph rendering.
    pub fn with_font(mut self, font_path: Option<PathBuf>) -> Self {
        self.font_path = font_path;
        self
    }
}
