use depthcam_base::RgbFrame;
use depthcam_image::{ImageError, frame_to_u32, hconcat};

/// Camera frame on the left, depth map on the right, packed for `minifb`.
pub fn side_by_side(
    frame: &RgbFrame,
    depth: &RgbFrame,
) -> Result<(Vec<u32>, usize, usize), ImageError> {
    let composite = hconcat(frame, depth)?;
    let (width, height) = composite.dimensions();
    Ok((frame_to_u32(&composite), width, height))
}

/// Window title with the latest model latency and the drop count.
pub fn status_title(latency_ms: Option<u64>, dropped: u64) -> String {
    match latency_ms {
        Some(ms) => format!("Camera Depth - {ms} ms - {dropped} dropped - ESC to exit"),
        None => "Camera Depth - warming up - ESC to exit".to_string(),
    }
}
