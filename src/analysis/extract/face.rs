use crate::analysis::extract::{ObjectView, PixelRect};
use crate::render::buffer::PixelBuffer;

/// Skin-tone measurement over the placed photos.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FaceSignal {
    /// The scene has no photos; no finding is emitted.
    NoPhotos,
    /// The scene has photos but none were drawn.
    Skipped,
    /// Share of drawn photo area classified as skin, in `0..=1`.
    SkinFraction(f64),
}

/// Measure skin-tone pixels inside the frames of drawn photos.
pub fn face_signal(buffer: &PixelBuffer, view: &ObjectView<'_>) -> FaceSignal {
    if !view.scene_has_images() {
        return FaceSignal::NoPhotos;
    }
    let scale = view.canvas().scale_to(buffer.width(), buffer.height());
    let mut total = 0u64;
    let mut skin = 0u64;
    for obj in view.images() {
        let Some(r) = PixelRect::from_rect(obj.frame.rect(), scale, buffer.width(), buffer.height())
        else {
            continue;
        };
        total += r.area();
        skin += r
            .pixels()
            .filter(|&(x, y)| is_skin_tone(buffer.rgb_over_black(x, y)))
            .count() as u64;
    }
    if total == 0 {
        return FaceSignal::Skipped;
    }
    FaceSignal::SkinFraction(skin as f64 / total as f64)
}

/// YCbCr skin classifier: `Cb` in 77..=127, `Cr` in 133..=173, `Y` above 40.
pub fn is_skin_tone([r, g, b]: [u8; 3]) -> bool {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    y > 40.0 && (77.0..=127.0).contains(&cb) && (133.0..=173.0).contains(&cr)
}

#[cfg(test)]
#[path = "../../../tests/unit/analysis/extract/face.rs"]
mod tests;
