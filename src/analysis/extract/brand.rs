use crate::analysis::thresholds::BRAND_MAX_DISTANCE;
use crate::foundation::core::Rgba8;
use crate::foundation::math::redmean_distance;
use crate::render::buffer::PixelBuffer;

/// Share of pixels within [`BRAND_MAX_DISTANCE`] of `brand`, composited over black.
pub fn brand_coverage(buffer: &PixelBuffer, brand: Rgba8) -> f64 {
    let target = [brand.r, brand.g, brand.b];
    let hits = buffer
        .rgb_pixels()
        .filter(|px| redmean_distance(*px, target) <= BRAND_MAX_DISTANCE)
        .count();
    hits as f64 / buffer.pixel_count() as f64
}

#[cfg(test)]
#[path = "../../../tests/unit/analysis/extract/brand.rs"]
mod tests;
