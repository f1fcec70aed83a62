use depthcam_camera::CameraConfig;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = CameraConfig::default();
    assert_eq!(config.device(), "/dev/video0");
    assert_eq!(config.width(), 640);
    assert_eq!(config.height(), 480);
    assert_eq!(config.fps(), 30);
    assert_eq!(config.buffer_count(), 4);
}

#[test]
fn test_builder_chain() {
    let config = CameraConfig::default()
        .with_device("/dev/video2".to_string())
        .with_width(320)
        .with_height(240)
        .with_fps(15)
        .with_buffer_count(2);

    assert_eq!(config.device(), "/dev/video2");
    assert_eq!(config.width(), 320);
    assert_eq!(config.height(), 240);
    assert_eq!(config.fps(), 15);
    assert_eq!(config.buffer_count(), 2);
}

#[test]
fn test_zero_values_are_clamped() {
    let config = CameraConfig::default().with_fps(0).with_buffer_count(0);
    assert_eq!(config.fps(), 1);
    assert_eq!(config.buffer_count(), 1);
}

#[test]
fn test_frame_interval() {
    let config = CameraConfig::default().with_fps(4);
    assert_eq!(config.frame_interval(), Duration::from_millis(250));
}
