use depthcam_image::{ImageError, decode_rgb, decode_rgb_async, load_rgb};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode_png_rgb(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 200]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_decode_png_rgb() {
    let bytes = encode_png_rgb(5, 3);
    let frame = decode_rgb(&bytes).unwrap();

    assert_eq!(frame.dimensions(), (5, 3));
    assert_eq!(frame.pixel(4, 2), Some([4, 2, 200]));
}

#[test]
fn test_decode_png_rgba_drops_alpha() {
    let img = RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 0]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let frame = decode_rgb(&bytes).unwrap();
    assert_eq!(frame.data().len(), 2 * 2 * 3);
    assert_eq!(frame.pixel(1, 1), Some([9, 8, 7]));
}

#[test]
fn test_decode_garbage_fails() {
    let result = decode_rgb(&[0x00, 0x01, 0x02, 0x03]);
    assert!(matches!(result, Err(ImageError::Decode(_))));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = load_rgb("definitely/not/here.png");
    assert!(matches!(result, Err(ImageError::Io(_))));
}

#[test]
fn test_load_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("depthcam-decode-{}.png", std::process::id()));
    std::fs::write(&path, encode_png_rgb(4, 4)).unwrap();

    let frame = load_rgb(&path).unwrap();
    assert_eq!(frame.dimensions(), (4, 4));

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_decode_async_matches_sync() {
    let bytes = encode_png_rgb(3, 2);
    let sync = decode_rgb(&bytes).unwrap();
    let async_frame = decode_rgb_async(bytes).await.unwrap();
    assert_eq!(sync, async_frame);
}
