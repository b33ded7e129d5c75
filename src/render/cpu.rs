use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::assets::decode::{load_image, normalize_rel_path};
use crate::assets::text::{TextBrushRgba8, TextLayoutEngine, greek_layout};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::render::buffer::PixelBuffer;
use crate::render::{RasterOpts, RasterOutput, Rasterizer};
use crate::scene::model::{
    BackgroundFill, ImageObject, ObjectFrame, ObjectKind, Scene, SceneObject, ShapeKind,
    ShapeObject, TextBlock,
};

const CURVE_TOLERANCE: f64 = 0.1;

/// Directions used to fake a glyph outline by offset fills.
const OUTLINE_DIRS: [(f32, f32); 8] = [
    (-1.0, 0.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (-0.7071, -0.7071),
    (0.7071, -0.7071),
    (-0.7071, 0.7071),
    (0.7071, 0.7071),
];

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

#[derive(Clone)]
struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

enum FontState {
    Unloaded,
    Loaded(LoadedFont),
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    top: [u8; 4],
    bottom: [u8; 4],
    w: u32,
    full_h: u32,
    first_row: u32,
    rows: u32,
}

/// CPU rasterizer powered by `vello_cpu` for vector, image and text drawing.
///
/// Caches decoded photos, gradient paints and the loaded font across calls; every call still
/// renders into a fresh buffer.
pub struct CpuRasterizer {
    opts: RasterOpts,
    ctx: Option<vello_cpu::RenderContext>,
    text_engine: TextLayoutEngine,
    font: FontState,
    image_cache: HashMap<String, ImagePaint>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new(RasterOpts::default())
    }
}

impl CpuRasterizer {
    /// Create a rasterizer with `opts`.
    pub fn new(opts: RasterOpts) -> Self {
        Self {
            opts,
            ctx: None,
            text_engine: TextLayoutEngine::new(),
            font: FontState::Unloaded,
            image_cache: HashMap::new(),
            gradient_cache: HashMap::new(),
        }
    }

    /// Options this rasterizer was built with.
    pub fn opts(&self) -> &RasterOpts {
        &self.opts
    }

    fn take_ctx(&mut self, width: u16, height: u16) -> vello_cpu::RenderContext {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx
    }

    fn draw_object(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        obj: &SceneObject,
        canvas: Canvas,
    ) -> ThumbResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let origin = vello_cpu::kurbo::Affine::translate((obj.frame.x, obj.frame.y));

        match &obj.kind {
            ObjectKind::Background(bg) => {
                let Some(clip) = canvas_clip(obj.frame, canvas) else {
                    return Ok(());
                };
                let (cw, ch) = (clip.width(), clip.height());
                match bg.fill {
                    BackgroundFill::Solid(c) => ctx.set_paint(color_to_cpu(c)),
                    BackgroundFill::VerticalGradient { top, bottom } => {
                        let img = self.gradient_paint(
                            top,
                            bottom,
                            cw as u32,
                            obj.frame.height.ceil() as u32,
                            clip.y0 as u32..clip.y1 as u32,
                        )?;
                        ctx.set_paint(img);
                    }
                }
                ctx.set_transform(origin * vello_cpu::kurbo::Affine::translate((clip.x0, clip.y0)));
                with_opacity(ctx, obj.opacity, |ctx| {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, cw, ch));
                });
                Ok(())
            }
            ObjectKind::Shape(shape) => {
                let path = shape_path(shape, obj.frame);
                ctx.set_transform(origin);
                ctx.set_paint(color_to_cpu(shape.fill));
                with_opacity(ctx, obj.opacity, |ctx| ctx.fill_path(&path));
                Ok(())
            }
            ObjectKind::Image(img) => {
                let p = self.image_paint_for(img)?;
                let sx = obj.frame.width / f64::from(p.w);
                let sy = obj.frame.height / f64::from(p.h);
                ctx.set_transform(origin * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy));
                ctx.set_paint(p.paint);
                with_opacity(ctx, obj.opacity, |ctx| {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(p.w),
                        f64::from(p.h),
                    ));
                });
                Ok(())
            }
            ObjectKind::Text(text) => {
                ctx.set_transform(origin);
                match self.font_for_text() {
                    Some(font) => self.draw_glyph_text(ctx, text, obj, &font),
                    None => {
                        draw_greeked_text(ctx, text, obj);
                        Ok(())
                    }
                }
            }
        }
    }

    fn draw_glyph_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &TextBlock,
        obj: &SceneObject,
        font: &LoadedFont,
    ) -> ThumbResult<()> {
        let brush = TextBrushRgba8 {
            r: text.fill.r,
            g: text.fill.g,
            b: text.fill.b,
            a: text.fill.a,
        };
        let layout = self.text_engine.layout_plain(
            &text.content,
            &font.family,
            text.font_size as f32,
            text.letter_spacing as f32,
            text.line_height as f32,
            brush,
            obj.frame.width as f32,
        )?;
        let max_y = obj.frame.height as f32;
        let outline = text
            .stroke
            .filter(|_| text.stroke_width > 0.0)
            .map(|c| (c, (text.stroke_width / 2.0) as f32));

        with_opacity(ctx, obj.opacity, |ctx| {
            for line in layout.lines() {
                let m = line.metrics();
                if m.baseline + m.descent > max_y {
                    break;
                }
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let font_size = run.run().font_size();

                    if let Some((stroke, r)) = outline {
                        ctx.set_paint(color_to_cpu(stroke));
                        for (dx, dy) in OUTLINE_DIRS {
                            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x + dx * r,
                                y: g.y + dy * r,
                            });
                            ctx.glyph_run(&font.data)
                                .font_size(font_size)
                                .fill_glyphs(glyphs);
                        }
                    }

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font.data)
                        .font_size(font_size)
                        .fill_glyphs(glyphs);
                }
            }
        });
        Ok(())
    }

    fn font_for_text(&mut self) -> Option<LoadedFont> {
        if let FontState::Unloaded = self.font {
            self.font = match self.opts.font_path.clone() {
                None => FontState::Unavailable,
                Some(path) => match self.load_font(&path) {
                    Ok(font) => {
                        tracing::debug!(family = %font.family, "loaded text font");
                        FontState::Loaded(font)
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "font unavailable, falling back to greeked text"
                        );
                        FontState::Unavailable
                    }
                },
            };
        }
        match &self.font {
            FontState::Loaded(font) => Some(font.clone()),
            _ => None,
        }
    }

    fn load_font(&mut self, path: &Path) -> ThumbResult<LoadedFont> {
        let bytes = std::fs::read(path).map_err(|e| {
            ThumbError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        let family = self.text_engine.register_font(&bytes)?;
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(LoadedFont { family, data })
    }

    fn image_paint_for(&mut self, img: &ImageObject) -> ThumbResult<ImagePaint> {
        let norm = normalize_rel_path(&img.source)?;
        if let Some(p) = self.image_cache.get(&norm) {
            return Ok(p.clone());
        }

        let prepared = load_image(&self.opts.assets_root.join(Path::new(&norm)))?;
        let paint = ImagePaint {
            paint: rgba_premul_to_image(&prepared.rgba8_premul, prepared.width, prepared.height)?,
            w: prepared.width,
            h: prepared.height,
        };
        self.image_cache.insert(norm, paint.clone());
        Ok(paint)
    }

    /// Vertical gradient over a frame `full_h` rows tall, materialized for `rows` only.
    fn gradient_paint(
        &mut self,
        top: Rgba8,
        bottom: Rgba8,
        w: u32,
        full_h: u32,
        rows: std::ops::Range<u32>,
    ) -> ThumbResult<vello_cpu::Image> {
        let w = w.max(1);
        let full_h = full_h.max(1);
        let n_rows = rows.end.saturating_sub(rows.start).max(1);
        let key = GradientKey {
            top: top.to_array(),
            bottom: bottom.to_array(),
            w,
            full_h,
            first_row: rows.start,
            rows: n_rows,
        };
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }
        let mut bytes = vec![0u8; (w as usize).saturating_mul(n_rows as usize).saturating_mul(4)];
        let h1 = f64::from(full_h - 1);
        for j in 0..n_rows {
            let y = rows.start.saturating_add(j);
            let t = if h1 <= 0.0 { 0.0 } else { (f64::from(y) / h1).min(1.0) };
            let lerp = |a: u8, b: u8| -> u8 {
                let af = f64::from(a);
                let bf = f64::from(b);
                (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
            };
            let c = Rgba8::rgba(
                lerp(top.r, bottom.r),
                lerp(top.g, bottom.g),
                lerp(top.b, bottom.b),
                lerp(top.a, bottom.a),
            )
            .to_premul_array();
            let row_start = (j as usize) * (w as usize) * 4;
            for px in bytes[row_start..row_start + (w as usize) * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&c);
            }
        }
        let img = rgba_premul_to_image(&bytes, w, n_rows)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }
}

impl Rasterizer for CpuRasterizer {
    #[tracing::instrument(skip_all, fields(objects = scene.objects.len()))]
    fn rasterize(&mut self, scene: &Scene) -> ThumbResult<RasterOutput> {
        let canvas = scene.canvas;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ThumbError::raster("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ThumbError::raster("canvas height exceeds u16"))?;

        let mut ctx = self.take_ctx(width, height);
        let [r, g, b, a] = self.opts.clear_rgba;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));

        let mut skipped = Vec::new();
        for obj in scene.paint_order() {
            if !obj.is_visible_on(canvas) {
                continue;
            }
            if let Err(e) = self.draw_object(&mut ctx, obj, canvas) {
                tracing::warn!(id = %obj.id, kind = obj.kind.tag(), error = %e, "object skipped");
                skipped.push(obj.id.clone());
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        let buffer = PixelBuffer::from_premul_rgba8(
            canvas.width,
            canvas.height,
            pixmap.data_as_u8_slice().to_vec(),
        )?;
        Ok(RasterOutput { buffer, skipped })
    }
}

fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f64,
    f: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    let opacity = opacity.clamp(0.0, 1.0) as f32;
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    f(ctx);
    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

fn draw_greeked_text(ctx: &mut vello_cpu::RenderContext, text: &TextBlock, obj: &SceneObject) {
    let blocks = greek_layout(text, obj.frame.width, obj.frame.height);
    if blocks.is_empty() {
        return;
    }
    let outline = text
        .stroke
        .filter(|_| text.stroke_width > 0.0)
        .map(|c| (c, text.stroke_width / 2.0));

    with_opacity(ctx, obj.opacity, |ctx| {
        if let Some((stroke, r)) = outline {
            ctx.set_paint(color_to_cpu(stroke));
            for b in &blocks {
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    b.x0 - r,
                    b.y0 - r,
                    b.x1 + r,
                    b.y1 + r,
                ));
            }
        }
        ctx.set_paint(color_to_cpu(text.fill));
        for b in &blocks {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(b.x0, b.y0, b.x1, b.y1));
        }
    });
}

fn shape_path(shape: &ShapeObject, frame: ObjectFrame) -> vello_cpu::kurbo::BezPath {
    let (w, h) = (frame.width, frame.height);
    match shape.shape {
        ShapeKind::Rect => {
            let radius = shape.corner_radius.min(w / 2.0).min(h / 2.0);
            vello_cpu::kurbo::RoundedRect::new(0.0, 0.0, w, h, radius).to_path(CURVE_TOLERANCE)
        }
        ShapeKind::Circle => {
            vello_cpu::kurbo::Ellipse::new((w / 2.0, h / 2.0), (w / 2.0, h / 2.0), 0.0)
                .to_path(CURVE_TOLERANCE)
        }
    }
}

/// Part of `frame` that lands on the canvas, in frame-local pixel coordinates snapped outward.
fn canvas_clip(frame: ObjectFrame, canvas: Canvas) -> Option<vello_cpu::kurbo::Rect> {
    let x0 = (-frame.x).max(0.0).floor();
    let y0 = (-frame.y).max(0.0).floor();
    let x1 = frame.width.min(f64::from(canvas.width) - frame.x).ceil();
    let y1 = frame.height.min(f64::from(canvas.height) - frame.y).ceil();
    (x1 > x0 && y1 > y0).then(|| vello_cpu::kurbo::Rect::new(x0, y0, x1, y1))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> ThumbResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ThumbError::raster("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ThumbError::raster("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ThumbError::raster("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    let mut may_have_opacities = false;
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> ThumbResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
