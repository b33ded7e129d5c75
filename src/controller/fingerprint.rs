use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::{BrandColor, Rgba8};
use crate::scene::model::{BackgroundFill, ObjectKind, Scene, ShapeKind};

const XXH3_SEED: u64 = 0x5c0e_7a11_b4a9_d3e1;

/// Stable 128-bit fingerprint of an analysis input (scene plus brand color).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Fingerprint `scene` and `brand`; equal inputs always hash equal.
pub fn fingerprint_input(scene: &Scene, brand: BrandColor) -> InputFingerprint {
    let mut h = StableHasher::new();
    h.write_color(brand.color());
    h.write_u32(scene.canvas.width);
    h.write_u32(scene.canvas.height);
    h.write_u64(scene.objects.len() as u64);
    for obj in &scene.objects {
        h.write_str(&obj.id);
        h.write_u32(obj.z);
        h.write_f64(obj.frame.x);
        h.write_f64(obj.frame.y);
        h.write_f64(obj.frame.width);
        h.write_f64(obj.frame.height);
        h.write_f64(obj.opacity);
        match &obj.kind {
            ObjectKind::Background(bg) => {
                h.write_u8(0);
                match bg.fill {
                    BackgroundFill::Solid(c) => {
                        h.write_u8(0);
                        h.write_color(c);
                    }
                    BackgroundFill::VerticalGradient { top, bottom } => {
                        h.write_u8(1);
                        h.write_color(top);
                        h.write_color(bottom);
                    }
                }
            }
            ObjectKind::Text(t) => {
                h.write_u8(1);
                h.write_str(&t.content);
                h.write_f64(t.font_size);
                h.write_color(t.fill);
                match t.stroke {
                    Some(c) => {
                        h.write_u8(1);
                        h.write_color(c);
                    }
                    None => h.write_u8(0),
                }
                h.write_f64(t.stroke_width);
                h.write_f64(t.letter_spacing);
                h.write_f64(t.line_height);
            }
            ObjectKind::Shape(s) => {
                h.write_u8(2);
                h.write_u8(match s.shape {
                    ShapeKind::Rect => 0,
                    ShapeKind::Circle => 1,
                });
                h.write_color(s.fill);
                h.write_f64(s.corner_radius);
            }
            ObjectKind::Image(i) => {
                h.write_u8(3);
                h.write_str(&i.source);
                h.write_u32(i.intrinsic_width);
                h.write_u32(i.intrinsic_height);
            }
        }
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn write_color(&mut self, c: Rgba8) {
        self.write_bytes(&c.to_array());
    }

    fn finish(self) -> InputFingerprint {
        let v = self.inner.digest128();
        InputFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/fingerprint.rs"]
mod tests;
