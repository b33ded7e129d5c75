use super::*;

const BRAND: Rgba8 = Rgba8::rgb(0xef, 0x44, 0x44);

fn z_of(scene: &Scene, id: &str) -> u32 {
    scene.get(id).unwrap().z
}

#[test]
fn default_scene_matches_editor_start() {
    let scene = default_scene(BRAND).unwrap();
    assert_eq!(scene.objects.len(), 3);
    let order = scene.paint_order();
    assert!(order[0].is_background());
    let sub = order[2].as_text().unwrap();
    assert_eq!(sub.fill, BRAND);
    let head = order[1].as_text().unwrap();
    assert_eq!(head.font_size, 140.0);
}

#[test]
fn presets_use_brand_color() {
    let scene = SceneBuilder::new(Canvas::default(), BRAND)
        .rect_preset()
        .circle_preset()
        .build()
        .unwrap();
    for obj in &scene.objects {
        let ObjectKind::Shape(s) = &obj.kind else {
            panic!("expected shape");
        };
        assert_eq!(s.fill, BRAND);
        assert_eq!(obj.opacity, 0.9);
    }
}

#[test]
fn background_is_kept_lowest() {
    let scene = SceneBuilder::new(Canvas::default(), BRAND)
        .text_preset(TextPreset::Headline, "HI")
        .background(BackgroundFill::Solid(Rgba8::BLACK))
        .build()
        .unwrap();
    assert!(scene.paint_order()[0].is_background());
}

#[test]
fn z_order_moves_stay_contiguous() {
    let b = SceneBuilder::new(Canvas::default(), BRAND)
        .background(BackgroundFill::Solid(Rgba8::BLACK))
        .text_preset(TextPreset::Headline, "A")
        .rect_preset();
    let rect = b.last_id().unwrap().to_owned();
    let b = b.send_to_back(&rect).unwrap();
    let scene = b.build().unwrap();

    assert_eq!(z_of(&scene, &rect), 1);
    let mut zs: Vec<u32> = scene.objects.iter().map(|o| o.z).collect();
    zs.sort_unstable();
    assert_eq!(zs, [0, 1, 2]);

    let scene = SceneBuilder::from_scene(scene, BRAND)
        .bring_to_front(&rect)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(z_of(&scene, &rect), 2);
}

#[test]
fn duplicate_offsets_and_stacks_on_top() {
    let b = SceneBuilder::new(Canvas::default(), BRAND).circle_preset();
    let id = b.last_id().unwrap().to_owned();
    let scene = b.duplicate(&id).unwrap().build().unwrap();
    assert_eq!(scene.objects.len(), 2);
    let copy = &scene.objects[1];
    assert_ne!(copy.id, id);
    assert_eq!(copy.frame.x, 620.0);
    assert_eq!(copy.frame.y, 440.0);
    assert!(copy.z > z_of(&scene, &id));
}

#[test]
fn photo_is_scaled_down_to_slot() {
    let scene = SceneBuilder::new(Canvas::default(), BRAND)
        .photo("face.png", 1200, 800)
        .unwrap()
        .build()
        .unwrap();
    let f = scene.objects[0].frame;
    assert_eq!((f.width, f.height), (600.0, 400.0));

    let scene = SceneBuilder::new(Canvas::default(), BRAND)
        .photo("small.png", 100, 50)
        .unwrap()
        .build()
        .unwrap();
    let f = scene.objects[0].frame;
    assert_eq!((f.width, f.height), (100.0, 50.0));
}

#[test]
fn remove_and_unknown_ids() {
    let b = SceneBuilder::new(Canvas::default(), BRAND).rect_preset();
    let id = b.last_id().unwrap().to_owned();
    let scene = b.remove(&id).unwrap().build().unwrap();
    assert!(scene.objects.is_empty());

    let b = SceneBuilder::new(Canvas::default(), BRAND);
    assert!(b.remove("nope").is_err());
}

#[test]
fn background_color_replaces_fill() {
    let scene = SceneBuilder::from_scene(default_scene(BRAND).unwrap(), BRAND)
        .background_color(Rgba8::rgb(1, 2, 3))
        .build()
        .unwrap();
    let bg = scene.paint_order()[0];
    assert_eq!(
        bg.kind,
        ObjectKind::Background(Background {
            fill: BackgroundFill::Solid(Rgba8::rgb(1, 2, 3))
        })
    );
}
