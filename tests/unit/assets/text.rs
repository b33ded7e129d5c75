use super::*;
use crate::foundation::core::Rgba8;

fn block(content: &str, font_size: f64) -> TextBlock {
    TextBlock {
        content: content.to_owned(),
        font_size,
        fill: Rgba8::WHITE,
        stroke: None,
        stroke_width: 0.0,
        letter_spacing: 0.0,
        line_height: 1.0,
    }
}

#[test]
fn greek_one_block_per_word_on_one_line() {
    let rects = greek_layout(&block("AB CDE", 100.0), 1000.0, 200.0);
    assert_eq!(rects.len(), 2);
    assert!((rects[0].x0 - 0.0).abs() < 1e-9);
    assert!((rects[0].width() - 110.0).abs() < 1e-9);
    assert!((rects[1].x0 - 140.0).abs() < 1e-9);
    assert!((rects[1].width() - 165.0).abs() < 1e-9);
    assert!((rects[0].height() - 72.0).abs() < 1e-9);
    assert_eq!(rects[0].y0, rects[1].y0);
}

#[test]
fn greek_wraps_and_stops_at_frame_bottom() {
    // Each word is 4 * 55 = 220 wide; two fit per 500px line.
    let rects = greek_layout(&block("AAAA BBBB CCCC DDDD EEEE", 100.0), 500.0, 190.0);
    assert_eq!(rects.len(), 4);
    assert!(rects[2].y0 > rects[0].y0);
    assert!(rects.iter().all(|r| r.y1 <= 190.0));
}

#[test]
fn greek_empty_content_draws_nothing() {
    assert!(greek_layout(&block("   ", 100.0), 500.0, 500.0).is_empty());
    assert!(greek_layout(&block("TALL", 100.0), 500.0, 10.0).is_empty());
}

#[test]
fn greek_clips_overlong_word_to_frame_width() {
    let rects = greek_layout(&block("ABCDEFGHIJ", 100.0), 300.0, 200.0);
    assert_eq!(rects.len(), 1);
    assert!((rects[0].x1 - 300.0).abs() < 1e-9);
}
