use std::sync::Arc;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::foundation::math::{mul_div255_u8, relative_luminance};

/// Rasterized composition as straight-alpha RGBA8, row-major, tightly packed.
///
/// Buffers are immutable once built; clones share the pixel storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl PixelBuffer {
    /// Wrap straight RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> ThumbResult<Self> {
        if width == 0 || height == 0 {
            return Err(ThumbError::raster("pixel buffer width/height must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| ThumbError::raster("pixel buffer size overflows"))?;
        if data.len() != expected {
            return Err(ThumbError::raster(format!(
                "pixel buffer byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: data.into(),
        })
    }

    /// Wrap premultiplied RGBA8 bytes, converting them to straight alpha.
    pub fn from_premul_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> ThumbResult<Self> {
        unpremultiply_rgba8_in_place(&mut data);
        Self::from_rgba8(width, height, data)
    }

    /// Build a buffer by evaluating `f` at every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba8) -> ThumbResult<Self> {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_array());
            }
        }
        Self::from_rgba8(width, height, data)
    }

    /// Single-color buffer.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> ThumbResult<Self> {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as a canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Raw straight RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`; callers must stay in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.index(x, y);
        Rgba8::rgba(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Pixel color composited over opaque black.
    pub fn rgb_over_black(&self, x: u32, y: u32) -> [u8; 3] {
        rgb_over_black(&self.data[self.index(x, y)..])
    }

    /// Iterator over every pixel composited over opaque black.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(4).map(rgb_over_black)
    }

    /// WCAG relative luminance of the pixel composited over black.
    pub fn luminance(&self, x: u32, y: u32) -> f64 {
        let [r, g, b] = self.rgb_over_black(x, y);
        relative_luminance(r, g, b)
    }

    /// Box-filter downsample to `width x height` (each output pixel averages its source cell).
    pub fn downsample(&self, width: u32, height: u32) -> ThumbResult<Self> {
        if width == 0 || height == 0 || width > self.width || height > self.height {
            return Err(ThumbError::raster(format!(
                "cannot downsample {}x{} to {width}x{height}",
                self.width, self.height
            )));
        }

        let mut out = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for dy in 0..height {
            let sy0 = cell_start(dy, height, self.height);
            let sy1 = cell_start(dy + 1, height, self.height);
            for dx in 0..width {
                let sx0 = cell_start(dx, width, self.width);
                let sx1 = cell_start(dx + 1, width, self.width);
                let mut acc = [0u64; 4];
                for sy in sy0..sy1 {
                    for sx in sx0..sx1 {
                        let i = self.index(sx, sy);
                        let a = u16::from(self.data[i + 3]);
                        acc[0] += u64::from(mul_div255_u8(u16::from(self.data[i]), a));
                        acc[1] += u64::from(mul_div255_u8(u16::from(self.data[i + 1]), a));
                        acc[2] += u64::from(mul_div255_u8(u16::from(self.data[i + 2]), a));
                        acc[3] += u64::from(a);
                    }
                }
                let n = u64::from((sx1 - sx0) * (sy1 - sy0)).max(1);
                for c in acc {
                    out.push(((c + n / 2) / n) as u8);
                }
            }
        }
        Self::from_premul_rgba8(width, height, out)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

fn cell_start(i: u32, dst: u32, src: u32) -> u32 {
    ((u64::from(i) * u64::from(src)) / u64::from(dst)) as u32
}

fn rgb_over_black(px: &[u8]) -> [u8; 3] {
    let a = u16::from(px[3]);
    [
        mul_div255_u8(u16::from(px[0]), a),
        mul_div255_u8(u16::from(px[1]), a),
        mul_div255_u8(u16::from(px[2]), a),
    ]
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
