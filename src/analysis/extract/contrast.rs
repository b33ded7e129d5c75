use crate::analysis::extract::{ObjectView, PixelRect};
use crate::analysis::thresholds::{CONTRAST_FOREGROUND_PERCENTILE, CONTRAST_RING_PX};
use crate::foundation::core::{Rect, Vec2};
use crate::foundation::math::contrast_ratio;
use crate::render::buffer::PixelBuffer;

/// Lowest contrast ratio over the visible text blocks, `None` when there is no text.
pub fn text_contrast(buffer: &PixelBuffer, view: &ObjectView<'_>) -> Option<f64> {
    let scale = view.canvas().scale_to(buffer.width(), buffer.height());
    view.texts()
        .filter_map(|(obj, _)| block_contrast(buffer, obj.frame.rect(), scale))
        .min_by(f64::total_cmp)
}

/// Contrast ratio of the content of `rect` against the ring of pixels just outside it.
///
/// Background luminance is the ring median (the box median when the ring is clipped away).
/// Foreground luminance is the box pixel ranked at [`CONTRAST_FOREGROUND_PERCENTILE`] by
/// distance from the background.
pub fn block_contrast(buffer: &PixelBuffer, rect: Rect, scale: Vec2) -> Option<f64> {
    let (w, h) = (buffer.width(), buffer.height());
    let inner = PixelRect::from_rect(rect, scale, w, h)?;
    let ring_x = (CONTRAST_RING_PX * scale.x).round().max(1.0) as u32;
    let ring_y = (CONTRAST_RING_PX * scale.y).round().max(1.0) as u32;
    let outer = inner.outset(ring_x, ring_y, w, h);

    let mut ring: Vec<f64> = outer
        .pixels()
        .filter(|&(x, y)| !inner.contains(x, y))
        .map(|(x, y)| buffer.luminance(x, y))
        .collect();
    let mut inside: Vec<f64> = inner.pixels().map(|(x, y)| buffer.luminance(x, y)).collect();

    let lb = if ring.is_empty() {
        median(&mut inside.clone())?
    } else {
        median(&mut ring)?
    };

    let mut ranked: Vec<(f64, f64)> = inside.drain(..).map(|l| ((l - lb).abs(), l)).collect();
    let idx = quantile_index(ranked.len(), CONTRAST_FOREGROUND_PERCENTILE)?;
    let (_, &mut (_, lf), _) = ranked.select_nth_unstable_by(idx, |a, b| a.0.total_cmp(&b.0));

    Some(contrast_ratio(lf, lb))
}

fn median(values: &mut [f64]) -> Option<f64> {
    let idx = quantile_index(values.len(), 0.5)?;
    let (_, m, _) = values.select_nth_unstable_by(idx, f64::total_cmp);
    Some(*m)
}

fn quantile_index(len: usize, q: f64) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((((len - 1) as f64) * q).round() as usize)
}

#[cfg(test)]
#[path = "../../../tests/unit/analysis/extract/contrast.rs"]
mod tests;
