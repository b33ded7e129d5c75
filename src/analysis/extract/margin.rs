use crate::analysis::extract::ObjectView;
use crate::analysis::thresholds::SAFE_MARGIN_PX;
use crate::foundation::core::{Canvas, DESIGN_HEIGHT, DESIGN_WIDTH};
use crate::scene::model::ObjectFrame;

/// Ids of visible text blocks that leave the safe area, in paint order.
pub fn margin_violations(view: &ObjectView<'_>) -> Vec<String> {
    let canvas = view.canvas();
    view.texts()
        .filter(|(obj, _)| !inside_safe_area(obj.frame, canvas))
        .map(|(obj, _)| obj.id.clone())
        .collect()
}

/// True when `frame` lies within the [`SAFE_MARGIN_PX`] inset of `canvas`, edges included.
///
/// The inset scales with the canvas per axis.
pub fn inside_safe_area(frame: ObjectFrame, canvas: Canvas) -> bool {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let mx = SAFE_MARGIN_PX * w / f64::from(DESIGN_WIDTH);
    let my = SAFE_MARGIN_PX * h / f64::from(DESIGN_HEIGHT);
    frame.x >= mx
        && frame.y >= my
        && frame.x + frame.width <= w - mx
        && frame.y + frame.height <= h - my
}

#[cfg(test)]
#[path = "../../../tests/unit/analysis/extract/margin.rs"]
mod tests;
