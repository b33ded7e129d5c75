use std::path::Path;

use anyhow::Context;

use crate::foundation::error::ThumbResult;
use crate::render::buffer::PixelBuffer;

/// Write `buffer` to `path` as an RGBA PNG, creating parent directories as needed.
pub fn export_png(buffer: &PixelBuffer, path: &Path) -> ThumbResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        buffer.as_bytes(),
        buffer.width(),
        buffer.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    tracing::debug!(path = %path.display(), "exported png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
