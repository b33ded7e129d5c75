use super::*;
use serde_json::json;

#[test]
fn canvas_default_is_720p() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1280, 720));
    assert_eq!(c.area(), 921_600);
    assert!(Canvas::new(0, 10).is_err());
}

#[test]
fn canvas_scale_is_per_axis() {
    let s = Canvas::default().scale_to(120, 68);
    assert!((s.x - 120.0 / 1280.0).abs() < 1e-12);
    assert!((s.y - 68.0 / 720.0).abs() < 1e-12);
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));

    let c: Rgba8 = serde_json::from_value(json!("#0000FF80")).unwrap();
    assert_eq!(c, Rgba8::rgba(0, 0, 255, 128));

    assert!(serde_json::from_value::<Rgba8>(json!("#fff")).is_err());
}

#[test]
fn parses_object_and_array_forms() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));

    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, Rgba8::rgba(1, 2, 3, 4));
}

#[test]
fn hex_serialization_is_lowercase() {
    assert_eq!(
        serde_json::to_value(Rgba8::rgb(0xEF, 0x44, 0x44)).unwrap(),
        json!("#ef4444")
    );
    assert_eq!(Rgba8::rgba(0, 0, 0, 0x80).to_hex(), "#00000080");
}

#[test]
fn brand_color_accepts_only_six_digit_hex() {
    let b = BrandColor::parse("#ef4444").unwrap();
    assert_eq!(b.color(), Rgba8::rgb(0xef, 0x44, 0x44));
    assert_eq!(b.to_string(), "#ef4444");

    for bad in ["ef4444", "#ef444", "#ef444480", "#gg4444", "red", ""] {
        let err = BrandColor::parse(bad).unwrap_err();
        assert!(err.is_usage(), "{bad} should be a usage error");
    }
}

#[test]
fn premul_array_scales_channels() {
    assert_eq!(Rgba8::rgba(255, 128, 0, 128).to_premul_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::WHITE.to_premul_array(), [255, 255, 255, 255]);
}
