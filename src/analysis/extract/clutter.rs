use crate::analysis::extract::ObjectView;
use crate::analysis::thresholds::CLUTTER_MIN_AREA_FRACTION;

/// Number of non-background objects whose on-canvas area exceeds
/// [`CLUTTER_MIN_AREA_FRACTION`] of the canvas.
pub fn significant_objects(view: &ObjectView<'_>) -> usize {
    let canvas = view.canvas();
    let min_area = canvas.area() as f64 * CLUTTER_MIN_AREA_FRACTION;
    view.objects()
        .iter()
        .filter(|o| !o.is_background())
        .filter(|o| o.frame.rect().intersect(canvas.rect()).area() > min_area)
        .count()
}

#[cfg(test)]
#[path = "../../../tests/unit/analysis/extract/clutter.rs"]
mod tests;
