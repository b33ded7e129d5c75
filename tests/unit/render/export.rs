use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn exported_png_decodes_to_same_pixels() {
    let dir = std::env::temp_dir().join(format!(
        "thumbscore_export_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let path = dir.join("nested").join("thumb.png");
    let buf = PixelBuffer::from_fn(3, 2, |x, y| Rgba8::rgb(x as u8 * 80, y as u8 * 100, 7)).unwrap();

    export_png(&buf, &path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [160, 100, 7, 255]);
}

#[test]
fn unwritable_path_is_an_error() {
    let buf = PixelBuffer::solid(1, 1, Rgba8::BLACK).unwrap();
    let err = export_png(&buf, Path::new("/dev/null/thumb.png")).unwrap_err();
    assert!(err.to_string().contains("thumb.png") || err.to_string().contains("/dev/null"));
}
