//! Signal extractors: pure functions from the rasterized buffer and the visible objects to one
//! metric each. Extractors never read each other's output.

/// Brand color coverage.
pub mod brand;
/// Headline word count.
pub mod brevity;
/// Significant object count.
pub mod clutter;
/// WCAG contrast of text against its backdrop.
pub mod contrast;
/// Skin-tone proxy for a face in placed photos.
pub mod face;
/// Text frames against the safe-area inset.
pub mod margin;
/// Contrast after downsampling to thumbnail size.
pub mod readability;

use crate::foundation::core::{Canvas, Rect, Rgba8, Vec2};
use crate::foundation::error::ThumbResult;
use crate::render::buffer::PixelBuffer;
use crate::scene::model::{ObjectKind, Scene, SceneObject, TextBlock};

use face::FaceSignal;

/// Every measured quantity of one run, one field per extractor.
#[derive(Clone, Debug, PartialEq)]
pub struct Metrics {
    /// Lowest text contrast ratio; `None` without text.
    pub contrast: Option<f64>,
    /// Word count of the longest headline; `None` without headlines.
    pub headline_words: Option<usize>,
    /// Number of significant non-background objects.
    pub clutter_objects: usize,
    /// Share of pixels matching the brand color, in `0..=1`.
    pub brand_coverage: f64,
    /// Ids of text blocks outside the safe margin.
    pub margin_violations: Vec<String>,
    /// Lowest text contrast ratio at thumbnail size; `None` without text.
    pub thumbnail_contrast: Option<f64>,
    /// Skin-tone share of drawn photos.
    pub face: FaceSignal,
}

/// The objects extractors look at: visible on the canvas, drawn successfully, in paint order.
#[derive(Clone, Debug)]
pub struct ObjectView<'a> {
    canvas: Canvas,
    objects: Vec<&'a SceneObject>,
    scene_has_images: bool,
}

impl<'a> ObjectView<'a> {
    /// View of `scene` with the objects named in `skipped` treated as absent.
    pub fn new(scene: &'a Scene, skipped: &[String]) -> Self {
        let objects = scene
            .paint_order()
            .into_iter()
            .filter(|o| o.is_visible_on(scene.canvas))
            .filter(|o| !skipped.iter().any(|s| *s == o.id))
            .collect();
        Self {
            canvas: scene.canvas,
            objects,
            scene_has_images: scene
                .objects
                .iter()
                .any(|o| matches!(o.kind, ObjectKind::Image(_))),
        }
    }

    /// Canvas the object geometry is expressed in.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Visible, drawn objects in paint order.
    pub fn objects(&self) -> &[&'a SceneObject] {
        &self.objects
    }

    /// Text blocks with at least one word.
    pub fn texts(&self) -> impl Iterator<Item = (&'a SceneObject, &'a TextBlock)> + '_ {
        self.objects.iter().filter_map(|o| {
            o.as_text()
                .filter(|t| !t.content.trim().is_empty())
                .map(|t| (*o, t))
        })
    }

    /// Drawn photos.
    pub fn images(&self) -> impl Iterator<Item = &'a SceneObject> + '_ {
        self.objects
            .iter()
            .copied()
            .filter(|o| o.as_image().is_some())
    }

    /// True when the scene holds a photo, drawn or not.
    pub fn scene_has_images(&self) -> bool {
        self.scene_has_images
    }
}

/// Run every extractor over `buffer`.
pub fn extract_metrics(
    buffer: &PixelBuffer,
    view: &ObjectView<'_>,
    brand: Rgba8,
) -> ThumbResult<Metrics> {
    Ok(Metrics {
        contrast: contrast::text_contrast(buffer, view),
        headline_words: brevity::headline_words(view),
        clutter_objects: clutter::significant_objects(view),
        brand_coverage: brand::brand_coverage(buffer, brand),
        margin_violations: margin::margin_violations(view),
        thumbnail_contrast: readability::thumbnail_contrast(buffer, view)?,
        face: face::face_signal(buffer, view),
    })
}

/// Half-open pixel span `[x0, x1) x [y0, y1)` on a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) x1: u32,
    pub(crate) y1: u32,
}

impl PixelRect {
    /// Pixels touched by `rect` (canvas coordinates) once scaled by `scale` and clipped to the
    /// raster. `None` when nothing remains.
    pub(crate) fn from_rect(rect: Rect, scale: Vec2, width: u32, height: u32) -> Option<Self> {
        let clip = |v: f64, max: u32| v.clamp(0.0, f64::from(max)) as u32;
        let r = Self {
            x0: clip((rect.x0 * scale.x).floor(), width),
            y0: clip((rect.y0 * scale.y).floor(), height),
            x1: clip((rect.x1 * scale.x).ceil(), width),
            y1: clip((rect.y1 * scale.y).ceil(), height),
        };
        (r.x1 > r.x0 && r.y1 > r.y0).then_some(r)
    }

    /// Grow by `dx`/`dy` pixels on each side, clipped to the raster.
    pub(crate) fn outset(self, dx: u32, dy: u32, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.saturating_sub(dx),
            y0: self.y0.saturating_sub(dy),
            x1: self.x1.saturating_add(dx).min(width),
            y1: self.y1.saturating_add(dy).min(height),
        }
    }

    pub(crate) fn contains(self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub(crate) fn area(self) -> u64 {
        u64::from(self.x1 - self.x0) * u64::from(self.y1 - self.y0)
    }

    pub(crate) fn pixels(self) -> impl Iterator<Item = (u32, u32)> {
        (self.y0..self.y1).flat_map(move |y| (self.x0..self.x1).map(move |x| (x, y)))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/analysis/extract/mod.rs"]
mod tests;
