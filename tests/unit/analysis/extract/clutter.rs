use super::*;
use crate::foundation::core::{Canvas, Rgba8};
use crate::scene::model::{
    Background, BackgroundFill, ObjectFrame, ObjectKind, Scene, SceneObject, ShapeKind,
    ShapeObject,
};

fn rect(id: &str, z: u32, frame: ObjectFrame) -> SceneObject {
    SceneObject {
        id: id.to_owned(),
        frame,
        z,
        opacity: 1.0,
        kind: ObjectKind::Shape(ShapeObject {
            shape: ShapeKind::Rect,
            fill: Rgba8::WHITE,
            corner_radius: 0.0,
        }),
    }
}

fn count(objects: Vec<SceneObject>) -> usize {
    let scene = Scene {
        canvas: Canvas::default(),
        objects,
    };
    significant_objects(&ObjectView::new(&scene, &[]))
}

#[test]
fn background_never_counts() {
    let bg = SceneObject {
        id: "bg".to_owned(),
        frame: ObjectFrame::new(0.0, 0.0, 1280.0, 720.0),
        z: 0,
        opacity: 1.0,
        kind: ObjectKind::Background(Background {
            fill: BackgroundFill::Solid(Rgba8::BLACK),
        }),
    };
    assert_eq!(count(vec![bg]), 0);
}

#[test]
fn tiny_objects_are_not_clutter() {
    // 2% of 1280x720 is 18432 px; exactly that much does not count.
    assert_eq!(
        count(vec![rect("r", 0, ObjectFrame::new(0.0, 0.0, 128.0, 144.0))]),
        0
    );
    assert_eq!(
        count(vec![rect("r", 0, ObjectFrame::new(0.0, 0.0, 129.0, 144.0))]),
        1
    );
}

#[test]
fn area_is_clipped_to_canvas() {
    // 200x200 frame with only 50x200 on the canvas.
    assert_eq!(
        count(vec![rect("r", 0, ObjectFrame::new(1230.0, 0.0, 200.0, 200.0))]),
        0
    );
}

#[test]
fn counts_every_significant_object() {
    let objects = (0..7)
        .map(|i| rect(&format!("r{i}"), i, ObjectFrame::new(10.0 * f64::from(i), 0.0, 300.0, 300.0)))
        .collect();
    assert_eq!(count(objects), 7);
}
