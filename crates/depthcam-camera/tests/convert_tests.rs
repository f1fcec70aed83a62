use depthcam_camera::convert::yuyv_to_rgb;

#[test]
fn test_yuyv_neutral_chroma_is_gray() {
    // Two pixels, Y = 16 and 235, U = V = 128.
    let frame = yuyv_to_rgb(&[16, 128, 235, 128], 2, 1).unwrap();
    assert_eq!(frame.dimensions(), (2, 1));
    assert_eq!(frame.pixel(0, 0), Some([16, 16, 16]));
    assert_eq!(frame.pixel(1, 0), Some([235, 235, 235]));
}

#[test]
fn test_yuyv_red_chroma() {
    // High V pushes red up and green down.
    let frame = yuyv_to_rgb(&[100, 128, 100, 228], 2, 1).unwrap();
    let [r, g, b] = frame.pixel(0, 0).unwrap();
    assert_eq!(r, 240);
    assert!(g < 100);
    assert_eq!(b, 100);
}

#[test]
fn test_yuyv_clamps() {
    let frame = yuyv_to_rgb(&[255, 255, 255, 255], 2, 1).unwrap();
    assert_eq!(frame.pixel(0, 0).unwrap()[0], 255);
    assert_eq!(frame.pixel(0, 0).unwrap()[2], 255);
}

#[test]
fn test_yuyv_short_buffer() {
    assert!(yuyv_to_rgb(&[0; 6], 2, 2).is_none());
}

#[test]
fn test_yuyv_odd_width() {
    assert!(yuyv_to_rgb(&[0; 6], 3, 1).is_none());
}

#[test]
fn test_yuyv_ignores_trailing_bytes() {
    let frame = yuyv_to_rgb(&[50, 128, 60, 128, 9, 9], 2, 1).unwrap();
    assert_eq!(frame.data(), &[50, 50, 50, 60, 60, 60]);
}
