use depthcam_base::RgbFrame;

/// Converts YUYV (YUV 4:2:2) pixel data to an RGB frame.
///
/// YUYV packs as `[Y0, U, Y1, V, ...]`, each pair of pixels sharing U and V.
/// Uses BT.601 coefficients:
/// - R = Y + 1.402 * (V - 128)
/// - G = Y - 0.344 * (U - 128) - 0.714 * (V - 128)
/// - B = Y + 1.772 * (U - 128)
///
/// Returns `None` if `data` is shorter than `width * height * 2` bytes or
/// the width is odd.
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Option<RgbFrame> {
    if width % 2 != 0 {
        return None;
    }
    let pixel_count = (width as usize).checked_mul(height as usize)?;
    let expected_len = pixel_count.checked_mul(2)?;
    if data.len() < expected_len {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);

    for chunk in data[..expected_len].chunks_exact(4) {
        let u = chunk[1] as f32 - 128.0;
        let v = chunk[3] as f32 - 128.0;
        for y in [chunk[0] as f32, chunk[2] as f32] {
            let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
            let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
            let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    RgbFrame::new(width as usize, height as usize, rgb).ok()
}
