use crate::ImageError;
use depthcam_base::RgbFrame;
use image::{GrayImage, RgbImage};

/// Copies a frame into an `image` buffer.
pub fn frame_to_rgb_image(frame: &RgbFrame) -> Result<RgbImage, ImageError> {
    RgbImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.data().to_vec(),
    )
    .ok_or_else(|| {
        ImageError::Decode(format!(
            "frame {}x{} does not fit an RGB buffer",
            frame.width(),
            frame.height()
        ))
    })
}

/// Takes ownership of an `image` buffer without copying pixels.
pub fn rgb_image_to_frame(image: RgbImage) -> Result<RgbFrame, ImageError> {
    let (width, height) = image.dimensions();
    Ok(RgbFrame::new(
        width as usize,
        height as usize,
        image.into_raw(),
    )?)
}

/// Expands a grayscale image through a per-intensity color lookup.
pub fn gray_to_frame(image: &GrayImage, lut: &[[u8; 3]; 256]) -> Result<RgbFrame, ImageError> {
    let (width, height) = image.dimensions();
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for &value in image.as_raw() {
        data.extend_from_slice(&lut[value as usize]);
    }
    Ok(RgbFrame::new(width as usize, height as usize, data)?)
}

/// Packs a frame as 0x00RRGGBB words, the layout `minifb` expects.
pub fn frame_to_u32(frame: &RgbFrame) -> Vec<u32> {
    frame
        .data()
        .chunks_exact(3)
        .map(|c| (c[0] as u32) << 16 | (c[1] as u32) << 8 | c[2] as u32)
        .collect()
}

/// Places two frames next to each other, top-aligned. Uncovered pixels are black.
pub fn hconcat(left: &RgbFrame, right: &RgbFrame) -> Result<RgbFrame, ImageError> {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    Ok(RgbFrame::from_fn(width, height, |x, y| {
        let pixel = if x < left.width() {
            left.pixel(x, y)
        } else {
            right.pixel(x - left.width(), y)
        };
        pixel.unwrap_or([0, 0, 0])
    })?)
}
