use crate::analysis::extract::ObjectView;
use crate::analysis::extract::contrast::text_contrast;
use crate::analysis::thresholds::{THUMB_HEIGHT, THUMB_WIDTH};
use crate::foundation::error::ThumbResult;
use crate::render::buffer::PixelBuffer;

/// Text contrast after a box-filter downsample to [`THUMB_WIDTH`] x [`THUMB_HEIGHT`].
///
/// Buffers already smaller than the thumbnail are only shrunk along the larger axes.
pub fn thumbnail_contrast(buffer: &PixelBuffer, view: &ObjectView<'_>) -> ThumbResult<Option<f64>> {
    if view.texts().next().is_none() {
        return Ok(None);
    }
    let small = buffer.downsample(
        THUMB_WIDTH.min(buffer.width()),
        THUMB_HEIGHT.min(buffer.height()),
    )?;
    Ok(text_contrast(&small, view))
}

#[cfg(test)]
#[path = "../../../tests/unit/analysis/extract/readability.rs"]
mod tests;
