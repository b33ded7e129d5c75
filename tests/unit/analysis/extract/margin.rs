use super::*;
use crate::foundation::core::Rgba8;
use crate::scene::model::{ObjectKind, Scene, SceneObject, TextBlock};

fn text(id: &str, z: u32, frame: ObjectFrame) -> SceneObject {
    SceneObject {
        id: id.to_owned(),
        frame,
        z,
        opacity: 1.0,
        kind: ObjectKind::Text(TextBlock {
            content: "Title".to_owned(),
            font_size: 120.0,
            fill: Rgba8::WHITE,
            stroke: None,
            stroke_width: 0.0,
            letter_spacing: 0.0,
            line_height: 1.0,
        }),
    }
}

#[test]
fn frame_on_the_inset_line_passes() {
    let c = Canvas::default();
    assert!(inside_safe_area(ObjectFrame::new(24.0, 24.0, 1232.0, 672.0), c));
    assert!(inside_safe_area(ObjectFrame::new(24.0, 300.0, 100.0, 100.0), c));
}

#[test]
fn one_pixel_beyond_fails() {
    let c = Canvas::default();
    assert!(!inside_safe_area(ObjectFrame::new(23.0, 300.0, 100.0, 100.0), c));
    assert!(!inside_safe_area(ObjectFrame::new(300.0, 23.0, 100.0, 100.0), c));
    assert!(!inside_safe_area(ObjectFrame::new(24.0, 24.0, 1233.0, 100.0), c));
    assert!(!inside_safe_area(ObjectFrame::new(24.0, 24.0, 100.0, 673.0), c));
}

#[test]
fn inset_scales_with_canvas() {
    let half = Canvas {
        width: 640,
        height: 360,
    };
    assert!(inside_safe_area(ObjectFrame::new(12.0, 12.0, 616.0, 336.0), half));
    assert!(!inside_safe_area(ObjectFrame::new(11.0, 12.0, 100.0, 100.0), half));
}

#[test]
fn violations_list_offending_text_ids() {
    let scene = Scene {
        canvas: Canvas::default(),
        objects: vec![
            text("inside", 0, ObjectFrame::new(100.0, 100.0, 400.0, 120.0)),
            text("edge", 1, ObjectFrame::new(10.0, 300.0, 400.0, 120.0)),
        ],
    };
    let view = ObjectView::new(&scene, &[]);
    assert_eq!(margin_violations(&view), vec!["edge".to_owned()]);
}
