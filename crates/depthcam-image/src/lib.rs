//! Image utilities for depthcam.
//!
//! Wraps the `image` crate: decoding encoded images into [`RgbFrame`]s,
//! converting between frames and `image` buffers, and the two raster
//! operations the depth pipeline needs (bilinear resize and quarter-turn
//! rotation).

pub mod convert;
pub mod error;

pub use convert::{
    frame_to_rgb_image, frame_to_u32, gray_to_frame, hconcat, rgb_image_to_frame,
};
pub use error::ImageError;

// Buffer types used across the workspace.
pub use image::{GrayImage, Luma, Rgb, RgbImage};

use depthcam_base::RgbFrame;
use image::imageops::{self, FilterType};
use std::path::Path;

/// Decodes an encoded image (format auto-detected) into an RGB8 frame.
///
/// Alpha is dropped, grayscale is expanded, 16-bit and float images are
/// converted down to 8 bits.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_rgb(data: &[u8]) -> Result<RgbFrame, ImageError> {
    let img = image::load_from_memory(data)?;
    rgb_image_to_frame(img.to_rgb8())
}

/// Like [`decode_rgb`], but runs on tokio's blocking thread pool.
pub async fn decode_rgb_async(data: Vec<u8>) -> Result<RgbFrame, ImageError> {
    tokio::task::spawn_blocking(move || decode_rgb(&data))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}

/// Reads and decodes an image file.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbFrame, ImageError> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_rgb(&bytes)
}

/// Bilinear resize of an RGB frame.
pub fn resize_rgb(frame: &RgbFrame, width: u32, height: u32) -> Result<RgbFrame, ImageError> {
    let src = frame_to_rgb_image(frame)?;
    rgb_image_to_frame(imageops::resize(&src, width, height, FilterType::Triangle))
}

/// Bilinear resize of a single-channel image.
pub fn resize_gray(image: &GrayImage, width: u32, height: u32) -> GrayImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Rotates a single-channel image 90 degrees clockwise.
pub fn rotate_gray_90(image: &GrayImage) -> GrayImage {
    imageops::rotate90(image)
}
