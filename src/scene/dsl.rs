use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::scene::model::{
    Background, BackgroundFill, ImageObject, ObjectFrame, ObjectKind, Scene, SceneObject,
    ShapeKind, ShapeObject, TextBlock,
};

/// Default backdrop gradient, top color.
pub const DEFAULT_BACKGROUND_TOP: Rgba8 = Rgba8::rgb(0x0b, 0x0d, 0x10);
/// Default backdrop gradient, bottom color.
pub const DEFAULT_BACKGROUND_BOTTOM: Rgba8 = Rgba8::rgb(0x11, 0x18, 0x27);

/// Offset applied to duplicated objects.
pub const DUPLICATE_OFFSET_PX: f64 = 20.0;

/// Largest box a placed photo is fitted into (photos are only scaled down).
const PHOTO_MAX_W: f64 = 600.0;
const PHOTO_MAX_H: f64 = 400.0;

/// Text style presets offered by the editor toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextPreset {
    /// Large outlined headline.
    Headline,
    /// Smaller subtitle in the brand color.
    Subtitle,
}

/// Incremental builder for scene snapshots.
///
/// Every edit produces the next snapshot; z indices are kept contiguous in paint order.
pub struct SceneBuilder {
    scene: Scene,
    brand: Rgba8,
    next_id: u32,
}

impl SceneBuilder {
    /// Start from an empty scene on `canvas`, styling presets with `brand`.
    pub fn new(canvas: Canvas, brand: Rgba8) -> Self {
        Self {
            scene: Scene {
                canvas,
                objects: Vec::new(),
            },
            brand,
            next_id: 0,
        }
    }

    /// Continue editing an existing snapshot.
    pub fn from_scene(scene: Scene, brand: Rgba8) -> Self {
        let next_id = scene.objects.len() as u32;
        let mut b = Self {
            scene,
            brand,
            next_id,
        };
        b.renumber();
        b
    }

    /// Append `kind` on top of the stack and return the new object's id.
    pub fn push(&mut self, frame: ObjectFrame, opacity: f64, kind: ObjectKind) -> String {
        let id = self.fresh_id(kind.tag());
        let z = self.scene.next_z();
        self.scene.objects.push(SceneObject {
            id: id.clone(),
            frame,
            z,
            opacity,
            kind,
        });
        id
    }

    /// Full-canvas background; kept below every other object.
    pub fn background(mut self, fill: BackgroundFill) -> Self {
        let c = self.scene.canvas;
        let frame = ObjectFrame::new(0.0, 0.0, f64::from(c.width), f64::from(c.height));
        let id = self.push(frame, 1.0, ObjectKind::Background(Background { fill }));
        self.move_to_back(&id);
        self
    }

    /// Replace the fill of the lowest background (adds one when missing).
    pub fn background_color(mut self, color: Rgba8) -> Self {
        let lowest = self
            .scene
            .objects
            .iter_mut()
            .filter(|o| o.is_background())
            .min_by_key(|o| o.z);
        match lowest {
            Some(obj) => {
                obj.kind = ObjectKind::Background(Background {
                    fill: BackgroundFill::Solid(color),
                });
                self
            }
            None => self.background(BackgroundFill::Solid(color)),
        }
    }

    /// Text block with explicit styling.
    pub fn text(mut self, frame: ObjectFrame, block: TextBlock) -> Self {
        self.push(frame, 1.0, ObjectKind::Text(block));
        self
    }

    /// Text block using a toolbar preset.
    pub fn text_preset(self, preset: TextPreset, content: impl Into<String>) -> Self {
        let (frame, block) = text_preset(preset, content.into(), self.brand);
        self.text(frame, block)
    }

    /// Brand-colored rounded rectangle preset.
    pub fn rect_preset(mut self) -> Self {
        let kind = ObjectKind::Shape(ShapeObject {
            shape: ShapeKind::Rect,
            fill: self.brand,
            corner_radius: 20.0,
        });
        self.push(ObjectFrame::new(100.0, 400.0, 420.0, 180.0), 0.9, kind);
        self
    }

    /// Brand-colored circle preset.
    pub fn circle_preset(mut self) -> Self {
        let kind = ObjectKind::Shape(ShapeObject {
            shape: ShapeKind::Circle,
            fill: self.brand,
            corner_radius: 0.0,
        });
        self.push(ObjectFrame::new(600.0, 420.0, 180.0, 180.0), 0.9, kind);
        self
    }

    /// Shape with explicit geometry and fill.
    pub fn shape(mut self, frame: ObjectFrame, shape: ShapeKind, fill: Rgba8) -> Self {
        let kind = ObjectKind::Shape(ShapeObject {
            shape,
            fill,
            corner_radius: 0.0,
        });
        self.push(frame, 1.0, kind);
        self
    }

    /// Place a photo, scaled down to fit the photo slot.
    pub fn photo(mut self, source: impl Into<String>, width: u32, height: u32) -> ThumbResult<Self> {
        if width == 0 || height == 0 {
            return Err(ThumbError::validation("photo size must be > 0"));
        }
        let (w, h) = (f64::from(width), f64::from(height));
        let scale = (PHOTO_MAX_W / w).min(PHOTO_MAX_H / h).min(1.0);
        let kind = ObjectKind::Image(ImageObject {
            source: source.into(),
            intrinsic_width: width,
            intrinsic_height: height,
        });
        self.push(ObjectFrame::new(780.0, 300.0, w * scale, h * scale), 1.0, kind);
        Ok(self)
    }

    /// Raise an object to the top of the stack.
    pub fn bring_to_front(mut self, id: &str) -> ThumbResult<Self> {
        let top = self.scene.next_z();
        self.object_mut(id)?.z = top;
        self.renumber();
        Ok(self)
    }

    /// Lower an object to just above the background layer(s).
    pub fn send_to_back(mut self, id: &str) -> ThumbResult<Self> {
        if self.object(id)?.is_background() {
            return Ok(self);
        }
        let mut order = self.ordered_ids();
        order.retain(|o| o != id);
        let insert_at = order
            .iter()
            .take_while(|o| {
                self.scene
                    .get(o.as_str())
                    .is_some_and(SceneObject::is_background)
            })
            .count();
        order.insert(insert_at, id.to_owned());
        self.apply_order(&order);
        Ok(self)
    }

    /// Clone an object, offset by [`DUPLICATE_OFFSET_PX`], on top of the stack.
    pub fn duplicate(mut self, id: &str) -> ThumbResult<Self> {
        let src = self.object(id)?.clone();
        if src.is_background() {
            return Err(ThumbError::validation("background objects cannot be duplicated"));
        }
        let frame = src.frame.offset(DUPLICATE_OFFSET_PX, DUPLICATE_OFFSET_PX);
        self.push(frame, src.opacity, src.kind);
        Ok(self)
    }

    /// Remove an object.
    pub fn remove(mut self, id: &str) -> ThumbResult<Self> {
        self.object(id)?;
        self.scene.objects.retain(|o| o.id != id);
        self.renumber();
        Ok(self)
    }

    /// Id of the most recently added object.
    pub fn last_id(&self) -> Option<&str> {
        self.scene.objects.last().map(|o| o.id.as_str())
    }

    /// Validate and return the snapshot.
    pub fn build(self) -> ThumbResult<Scene> {
        self.scene.validate()?;
        Ok(self.scene)
    }

    fn fresh_id(&mut self, tag: &str) -> String {
        loop {
            let id = format!("{tag}-{}", self.next_id);
            self.next_id += 1;
            if self.scene.get(&id).is_none() {
                return id;
            }
        }
    }

    fn object(&self, id: &str) -> ThumbResult<&SceneObject> {
        self.scene
            .get(id)
            .ok_or_else(|| ThumbError::validation(format!("unknown object id '{id}'")))
    }

    fn object_mut(&mut self, id: &str) -> ThumbResult<&mut SceneObject> {
        self.scene
            .objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ThumbError::validation(format!("unknown object id '{id}'")))
    }

    fn move_to_back(&mut self, id: &str) {
        let mut order = self.ordered_ids();
        order.retain(|o| o != id);
        order.insert(0, id.to_owned());
        self.apply_order(&order);
    }

    fn ordered_ids(&self) -> Vec<String> {
        self.scene
            .paint_order()
            .into_iter()
            .map(|o| o.id.clone())
            .collect()
    }

    fn apply_order(&mut self, order: &[String]) {
        for (z, id) in order.iter().enumerate() {
            if let Some(obj) = self.scene.objects.iter_mut().find(|o| &o.id == id) {
                obj.z = z as u32;
            }
        }
    }

    fn renumber(&mut self) {
        let order = self.ordered_ids();
        self.apply_order(&order);
    }
}

/// The editor's starting composition: gradient backdrop, outlined headline, brand subtitle.
pub fn default_scene(brand: Rgba8) -> ThumbResult<Scene> {
    let headline = TextBlock {
        content: "BIG BOLD TITLE".to_owned(),
        font_size: 140.0,
        fill: Rgba8::WHITE,
        stroke: Some(Rgba8::BLACK),
        stroke_width: 6.0,
        letter_spacing: 5.6,
        line_height: 0.9,
    };
    let subtitle = TextBlock {
        content: "Short subtitle".to_owned(),
        font_size: 64.0,
        fill: brand,
        stroke: None,
        stroke_width: 0.0,
        letter_spacing: 0.0,
        line_height: 1.0,
    };

    SceneBuilder::new(Canvas::default(), brand)
        .background(BackgroundFill::VerticalGradient {
            top: DEFAULT_BACKGROUND_TOP,
            bottom: DEFAULT_BACKGROUND_BOTTOM,
        })
        .text(ObjectFrame::new(80.0, 80.0, 1120.0, 130.0), headline)
        .text(ObjectFrame::new(84.0, 260.0, 860.0, 72.0), subtitle)
        .build()
}

fn text_preset(preset: TextPreset, content: String, brand: Rgba8) -> (ObjectFrame, TextBlock) {
    match preset {
        TextPreset::Headline => (
            ObjectFrame::new(100.0, 100.0, 1080.0, 112.0),
            TextBlock {
                content,
                font_size: 120.0,
                fill: Rgba8::WHITE,
                stroke: Some(Rgba8::BLACK),
                stroke_width: 5.0,
                letter_spacing: 3.6,
                line_height: 0.9,
            },
        ),
        TextPreset::Subtitle => (
            ObjectFrame::new(100.0, 220.0, 820.0, 64.0),
            TextBlock {
                content,
                font_size: 56.0,
                fill: brand,
                stroke: None,
                stroke_width: 0.0,
                letter_spacing: 0.0,
                line_height: 0.9,
            },
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
