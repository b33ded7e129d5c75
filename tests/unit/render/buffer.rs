use super::*;

#[test]
fn from_rgba8_checks_length() {
    assert!(PixelBuffer::from_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(PixelBuffer::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(PixelBuffer::from_rgba8(0, 2, vec![]).is_err());
}

#[test]
fn pixel_access_is_row_major() {
    let buf = PixelBuffer::from_fn(3, 2, |x, y| Rgba8::rgb(x as u8, y as u8, 0)).unwrap();
    assert_eq!(buf.pixel(2, 1), Rgba8::rgb(2, 1, 0));
    assert_eq!(buf.pixel_count(), 6);
    assert_eq!(buf.canvas(), Canvas { width: 3, height: 2 });
}

#[test]
fn premul_input_is_unpremultiplied() {
    let buf = PixelBuffer::from_premul_rgba8(1, 1, vec![64, 0, 128, 128]).unwrap();
    assert_eq!(buf.pixel(0, 0), Rgba8::rgba(128, 0, 255, 128));
    assert_eq!(buf.rgb_over_black(0, 0), [64, 0, 128]);
}

#[test]
fn luminance_of_white_is_one() {
    let buf = PixelBuffer::solid(2, 2, Rgba8::WHITE).unwrap();
    assert!((buf.luminance(1, 1) - 1.0).abs() < 1e-12);
}

#[test]
fn downsample_averages_cells() {
    // Left half white, right half black.
    let buf = PixelBuffer::from_fn(4, 2, |x, _| {
        if x < 2 { Rgba8::WHITE } else { Rgba8::BLACK }
    })
    .unwrap();
    let small = buf.downsample(2, 1).unwrap();
    assert_eq!(small.pixel(0, 0), Rgba8::WHITE);
    assert_eq!(small.pixel(1, 0), Rgba8::BLACK);

    let one = buf.downsample(1, 1).unwrap();
    assert_eq!(one.pixel(0, 0), Rgba8::rgb(128, 128, 128));
}

#[test]
fn downsample_handles_fractional_cells() {
    let buf = PixelBuffer::solid(1280, 720, Rgba8::rgb(10, 20, 30)).unwrap();
    let thumb = buf.downsample(120, 68).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (120, 68));
    assert_eq!(thumb.pixel(119, 67), Rgba8::rgb(10, 20, 30));
    assert!(buf.downsample(2000, 10).is_err());
}

#[test]
fn clones_share_storage_and_compare_equal() {
    let a = PixelBuffer::solid(2, 2, Rgba8::BLACK).unwrap();
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(a.as_bytes().as_ptr(), b.as_bytes().as_ptr());
}
