use crate::analysis::extract::{ObjectView, extract_metrics};
use crate::analysis::score::{Analysis, score};
use crate::foundation::core::BrandColor;
use crate::foundation::error::ThumbResult;
use crate::render::Rasterizer;
use crate::render::buffer::PixelBuffer;
use crate::render::cpu::CpuRasterizer;
use crate::scene::model::Scene;

/// Analyze `scene` against `brand_hex` (`#rrggbb`) with a default [`CpuRasterizer`].
///
/// Stateless: the same inputs always produce the same [`Analysis`].
pub fn run_analysis(scene: &Scene, brand_hex: &str) -> ThumbResult<Analysis> {
    let mut rasterizer = CpuRasterizer::default();
    run_analysis_with(&mut rasterizer, scene, brand_hex)
}

/// Analyze `scene` with a caller-provided rasterizer.
#[tracing::instrument(skip_all, fields(objects = scene.objects.len(), brand = brand_hex))]
pub fn run_analysis_with<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    scene: &Scene,
    brand_hex: &str,
) -> ThumbResult<Analysis> {
    let brand = BrandColor::parse(brand_hex)?;
    scene.validate()?;

    let out = rasterizer.rasterize(scene)?;
    if !out.skipped.is_empty() {
        tracing::debug!(skipped = ?out.skipped, "analysing without skipped objects");
    }
    let analysis = analyze_buffer(&out.buffer, scene, brand, &out.skipped)?;
    tracing::debug!(score = analysis.score, "analysis complete");
    Ok(analysis)
}

/// Extract metrics from an already rasterized `buffer` and score them.
///
/// Objects named in `skipped` are treated as absent.
pub fn analyze_buffer(
    buffer: &PixelBuffer,
    scene: &Scene,
    brand: BrandColor,
    skipped: &[String],
) -> ThumbResult<Analysis> {
    let view = ObjectView::new(scene, skipped);
    let metrics = extract_metrics(buffer, &view, brand.color())?;
    Ok(score(&metrics))
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/engine.rs"]
mod tests;
