use crate::analysis::extract::ObjectView;
use crate::analysis::thresholds::HEADLINE_MIN_FONT_PX;

/// Word count of the longest headline (text at or above [`HEADLINE_MIN_FONT_PX`]).
pub fn headline_words(view: &ObjectView<'_>) -> Option<usize> {
    view.texts()
        .filter(|(_, t)| t.font_size >= HEADLINE_MIN_FONT_PX)
        .map(|(_, t)| word_count(&t.content))
        .max()
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
#[path = "../../../tests/unit/analysis/extract/brevity.rs"]
mod tests;
