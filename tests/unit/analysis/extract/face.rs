use super::*;
use crate::foundation::core::{Canvas, Rgba8};
use crate::scene::model::{ImageObject, ObjectFrame, ObjectKind, Scene, SceneObject};

const SKIN: Rgba8 = Rgba8::rgb(224, 172, 150);

fn photo(id: &str, z: u32, frame: ObjectFrame) -> SceneObject {
    SceneObject {
        id: id.to_owned(),
        frame,
        z,
        opacity: 1.0,
        kind: ObjectKind::Image(ImageObject {
            source: format!("{id}.png"),
            intrinsic_width: 100,
            intrinsic_height: 100,
        }),
    }
}

fn scene(objects: Vec<SceneObject>) -> Scene {
    Scene {
        canvas: Canvas {
            width: 100,
            height: 100,
        },
        objects,
    }
}

/// Skin-colored left quarter, blue elsewhere.
fn buffer() -> PixelBuffer {
    PixelBuffer::from_fn(100, 100, |x, _| {
        if x < 25 { SKIN } else { Rgba8::rgb(30, 60, 200) }
    })
    .unwrap()
}

#[test]
fn classifier_accepts_skin_and_rejects_others() {
    assert!(is_skin_tone([SKIN.r, SKIN.g, SKIN.b]));
    assert!(is_skin_tone([141, 85, 36]));
    assert!(!is_skin_tone([30, 60, 200]));
    assert!(!is_skin_tone([0, 200, 0]));
    assert!(!is_skin_tone([20, 10, 8]));
}

#[test]
fn no_photos_means_no_signal() {
    let s = scene(Vec::new());
    assert_eq!(face_signal(&buffer(), &ObjectView::new(&s, &[])), FaceSignal::NoPhotos);
}

#[test]
fn fraction_is_measured_inside_photo_frames() {
    let s = scene(vec![photo("p", 0, ObjectFrame::new(0.0, 0.0, 50.0, 100.0))]);
    let FaceSignal::SkinFraction(f) = face_signal(&buffer(), &ObjectView::new(&s, &[])) else {
        panic!("expected a measurement");
    };
    assert!((f - 0.5).abs() < 1e-12, "f={f}");
}

#[test]
fn skipped_photos_are_not_measured() {
    let s = scene(vec![photo("p", 0, ObjectFrame::new(0.0, 0.0, 50.0, 100.0))]);
    let signal = face_signal(&buffer(), &ObjectView::new(&s, &["p".to_owned()]));
    assert_eq!(signal, FaceSignal::Skipped);
}
