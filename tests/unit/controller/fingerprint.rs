use super::*;
use crate::scene::dsl::default_scene;

fn brand(hex: &str) -> BrandColor {
    BrandColor::parse(hex).unwrap()
}

#[test]
fn equal_inputs_hash_equal() {
    let b = brand("#ef4444");
    let a = default_scene(b.color()).unwrap();
    let c = default_scene(b.color()).unwrap();
    assert_eq!(fingerprint_input(&a, b), fingerprint_input(&c, b));
}

#[test]
fn any_change_moves_the_hash() {
    let b = brand("#ef4444");
    let scene = default_scene(b.color()).unwrap();
    let base = fingerprint_input(&scene, b);

    assert_ne!(fingerprint_input(&scene, brand("#ef4445")), base);

    let mut moved = scene.clone();
    moved.objects[1].frame.x += 1.0;
    assert_ne!(fingerprint_input(&moved, b), base);

    let mut retext = scene.clone();
    if let ObjectKind::Text(t) = &mut retext.objects[1].kind {
        t.content.push('!');
    }
    assert_ne!(fingerprint_input(&retext, b), base);
}
