use crate::foundation::core::Rect;
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::scene::model::TextBlock;

/// Greeked glyph advance, in ems per character.
pub const GREEK_ADVANCE_EM: f64 = 0.55;
/// Greeked block height (cap height), in ems.
pub const GREEK_CAP_EM: f64 = 0.72;
/// Greeked inter-word space, in ems.
pub const GREEK_SPACE_EM: f64 = 0.3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the primary family name.
    pub(crate) fn register_font(&mut self, font_bytes: &[u8]) -> ThumbResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ThumbError::validation("no font families registered from font bytes")
        })?;

        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThumbError::validation("registered font family has no name"))?
            .to_string())
    }

    /// Shape and lay out plain text in a registered family, wrapped to `max_width_px`.
    ///
    /// `line_height` is a multiple of `size_px`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        letter_spacing_px: f32,
        line_height: f32,
        brush: TextBrushRgba8,
        max_width_px: f32,
    ) -> ThumbResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThumbError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            letter_spacing_px,
        ));
        builder.push_default(parley::style::StyleProperty::LineHeight(
            parley::style::LineHeight::FontSizeRelative(line_height),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(Some(max_width_px));
        layout.align(
            Some(max_width_px),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

/// Lay out `block` as greeked word blocks inside a `width x height` frame.
///
/// Rectangles are relative to the frame origin. Words wrap greedily; a line whose blocks would
/// extend past `height` ends the layout.
pub fn greek_layout(block: &TextBlock, width: f64, height: f64) -> Vec<Rect> {
    let fs = block.font_size;
    let advance = GREEK_ADVANCE_EM * fs + block.letter_spacing;
    let space = GREEK_SPACE_EM * fs;
    let cap = GREEK_CAP_EM * fs;
    let line_step = fs * block.line_height;
    let cap_offset = ((line_step - cap) / 2.0).max(0.0);

    let mut out = Vec::new();
    let mut line_top = 0.0;
    let mut x = 0.0;
    let mut line_has_word = false;

    for word in block.content.split_whitespace() {
        let chars = word.chars().count() as f64;
        let word_w = (chars * advance - block.letter_spacing).max(advance.min(fs));
        if line_has_word && x + space + word_w > width {
            line_top += line_step;
            x = 0.0;
            line_has_word = false;
        }
        let top = line_top + cap_offset;
        if top + cap > height {
            break;
        }
        let x0 = if line_has_word { x + space } else { x };
        let x1 = (x0 + word_w).min(width);
        if x1 > x0 {
            out.push(Rect::new(x0, top, x1, top + cap));
        }
        x = x0 + word_w;
        line_has_word = true;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
