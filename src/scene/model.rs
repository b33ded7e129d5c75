use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::{ThumbError, ThumbResult};

/// Read-only snapshot of a thumbnail composition.
///
/// Objects are stored in insertion order; paint order is ascending [`SceneObject::z`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Design canvas; geometry of every object is expressed in this space.
    #[serde(default)]
    pub canvas: Canvas,
    /// Drawable objects.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

/// One drawable object with its common attributes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneObject {
    /// Stable identifier, unique within the scene.
    pub id: String,
    /// Axis-aligned bounding box in canvas coordinates.
    pub frame: ObjectFrame,
    /// Paint-order index; 0 is painted first.
    pub z: u32,
    /// Opacity in `[0, 1]`.
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub opacity: f64,
    /// Kind-specific payload.
    pub kind: ObjectKind,
}

/// Bounding box `(x, y, width, height)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectFrame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (>= 0).
    pub width: f64,
    /// Height (>= 0).
    pub height: f64,
}

/// Discriminated union over drawable object kinds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Full-bleed backdrop.
    Background(Background),
    /// Text block.
    Text(TextBlock),
    /// Filled primitive shape.
    Shape(ShapeObject),
    /// Photo placed from an encoded image file.
    Image(ImageObject),
}

/// Background fill payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Background {
    /// How the frame is filled.
    pub fill: BackgroundFill,
}

/// Background paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundFill {
    /// Single color.
    Solid(Rgba8),
    /// Top-to-bottom linear gradient.
    VerticalGradient {
        /// Color at the top edge.
        top: Rgba8,
        /// Color at the bottom edge.
        bottom: Rgba8,
    },
}

/// Text block payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBlock {
    /// Text content; words are whitespace separated.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Glyph fill color.
    pub fill: Rgba8,
    /// Optional outline color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Rgba8>,
    /// Outline width in pixels.
    #[serde(default)]
    pub stroke_width: f64,
    /// Extra spacing between characters in pixels.
    #[serde(default)]
    pub letter_spacing: f64,
    /// Line height as a multiple of the font size.
    #[serde(default = "one")]
    pub line_height: f64,
}

/// Primitive shape kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Rectangle filling the frame.
    Rect,
    /// Circle (ellipse) inscribed in the frame.
    Circle,
}

/// Shape payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeObject {
    /// Primitive kind.
    pub shape: ShapeKind,
    /// Fill color.
    pub fill: Rgba8,
    /// Corner radius for rectangles, in pixels.
    #[serde(default)]
    pub corner_radius: f64,
}

/// Image payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageObject {
    /// Path of the encoded image, relative to the rasterizer's asset root.
    pub source: String,
    /// Decoded width in pixels.
    pub intrinsic_width: u32,
    /// Decoded height in pixels.
    pub intrinsic_height: u32,
}

fn one() -> f64 {
    1.0
}

fn is_one(v: &f64) -> bool {
    *v == 1.0
}

impl ObjectFrame {
    /// Build a frame from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Frame as a `kurbo` rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Area in square pixels.
    pub fn area(self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Frame offset by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

impl ObjectKind {
    /// Short lowercase tag, matching the JSON discriminant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Background(_) => "background",
            Self::Text(_) => "text",
            Self::Shape(_) => "shape",
            Self::Image(_) => "image",
        }
    }
}

impl SceneObject {
    /// Text payload, when this object is a text block.
    pub fn as_text(&self) -> Option<&TextBlock> {
        match &self.kind {
            ObjectKind::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Image payload, when this object is a photo.
    pub fn as_image(&self) -> Option<&ImageObject> {
        match &self.kind {
            ObjectKind::Image(i) => Some(i),
            _ => None,
        }
    }

    /// True for background objects.
    pub fn is_background(&self) -> bool {
        matches!(self.kind, ObjectKind::Background(_))
    }

    /// True when the object can contribute pixels to `canvas`.
    pub fn is_visible_on(&self, canvas: Canvas) -> bool {
        if self.opacity <= 0.0 {
            return false;
        }
        let r = self.frame.rect().intersect(canvas.rect());
        r.width() > 0.0 && r.height() > 0.0
    }
}

impl Scene {
    /// Empty scene on the default 1280x720 canvas.
    pub fn new() -> Self {
        Self {
            canvas: Canvas::default(),
            objects: Vec::new(),
        }
    }

    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ThumbResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ThumbError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(s: &str) -> ThumbResult<Self> {
        serde_json::from_str(s).map_err(|e| ThumbError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open scene JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON encoding.
    pub fn to_json_pretty(&self) -> ThumbResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ThumbError::serde(format!("encode scene JSON: {e}")))
    }

    /// Check structural invariants (unique ids and z, finite geometry, styling ranges).
    pub fn validate(&self) -> ThumbResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ThumbError::validation("canvas width/height must be > 0"));
        }

        let mut ids = BTreeSet::new();
        let mut zs = BTreeSet::new();
        for obj in &self.objects {
            if obj.id.is_empty() {
                return Err(ThumbError::validation("object id must be non-empty"));
            }
            if !ids.insert(obj.id.as_str()) {
                return Err(ThumbError::validation(format!(
                    "duplicate object id '{}'",
                    obj.id
                )));
            }
            if !zs.insert(obj.z) {
                return Err(ThumbError::validation(format!(
                    "object '{}' reuses z index {}",
                    obj.id, obj.z
                )));
            }
            if !obj.frame.is_finite() || obj.frame.width < 0.0 || obj.frame.height < 0.0 {
                return Err(ThumbError::validation(format!(
                    "object '{}' has invalid frame",
                    obj.id
                )));
            }
            if !obj.opacity.is_finite() || !(0.0..=1.0).contains(&obj.opacity) {
                return Err(ThumbError::validation(format!(
                    "object '{}' opacity must be within [0, 1]",
                    obj.id
                )));
            }
            obj.kind.validate(&obj.id)?;
        }
        Ok(())
    }

    /// Objects sorted by ascending z (paint order).
    pub fn paint_order(&self) -> Vec<&SceneObject> {
        let mut out: Vec<&SceneObject> = self.objects.iter().collect();
        out.sort_by_key(|o| o.z);
        out
    }

    /// Look up an object by id.
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Next free z index (one above the current top).
    pub fn next_z(&self) -> u32 {
        self.objects
            .iter()
            .map(|o| o.z.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// True when the scene has nothing but background objects.
    pub fn has_content(&self) -> bool {
        self.objects.iter().any(|o| !o.is_background())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectKind {
    fn validate(&self, id: &str) -> ThumbResult<()> {
        match self {
            Self::Background(_) => Ok(()),
            Self::Text(t) => {
                if !t.font_size.is_finite() || t.font_size <= 0.0 {
                    return Err(ThumbError::validation(format!(
                        "text '{id}' font_size must be finite and > 0"
                    )));
                }
                if !t.stroke_width.is_finite() || t.stroke_width < 0.0 {
                    return Err(ThumbError::validation(format!(
                        "text '{id}' stroke_width must be finite and >= 0"
                    )));
                }
                if !t.letter_spacing.is_finite() {
                    return Err(ThumbError::validation(format!(
                        "text '{id}' letter_spacing must be finite"
                    )));
                }
                if !t.line_height.is_finite() || t.line_height <= 0.0 {
                    return Err(ThumbError::validation(format!(
                        "text '{id}' line_height must be finite and > 0"
                    )));
                }
                Ok(())
            }
            Self::Shape(s) => {
                if !s.corner_radius.is_finite() || s.corner_radius < 0.0 {
                    return Err(ThumbError::validation(format!(
                        "shape '{id}' corner_radius must be finite and >= 0"
                    )));
                }
                Ok(())
            }
            Self::Image(i) => {
                if i.source.trim().is_empty() {
                    return Err(ThumbError::validation(format!(
                        "image '{id}' source must be non-empty"
                    )));
                }
                if i.intrinsic_width == 0 || i.intrinsic_height == 0 {
                    return Err(ThumbError::validation(format!(
                        "image '{id}' intrinsic size must be > 0"
                    )));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
