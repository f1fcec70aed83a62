use crate::{ElementType, InferError, ModelDescriptor, TensorLayout};
use depthcam_base::{RGB_CHANNELS, RgbFrame};

/// Input buffer packed for one model call.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTensor {
    bytes: Vec<u8>,
    shape: Vec<usize>,
    element_type: ElementType,
}

impl PreparedTensor {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    /// Values as f32, for float tensors. `None` for `Uint8`.
    pub fn to_f32(&self) -> Option<Vec<f32>> {
        if self.element_type == ElementType::Uint8 {
            return None;
        }
        Some(
            self.bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )
    }
}

/// Resize `frame` to the model's input side and pack it.
///
/// Float inputs get each channel divided by 255. `Uint8` inputs carry the
/// resized pixels unchanged, as quantized models fold normalization into
/// their quantization parameters.
///
/// # Errors
///
/// Returns `InferError::MalformedInput` for zero-area frames.
pub fn preprocess(
    frame: &RgbFrame,
    descriptor: &ModelDescriptor,
) -> Result<PreparedTensor, InferError> {
    frame.ensure_nonempty()?;

    let side = descriptor.input_side();
    let resized = depthcam_image::resize_rgb(frame, side as u32, side as u32)?;
    let pixels = resized.data();

    let bytes = match descriptor.input_type() {
        ElementType::Uint8 => reorder(pixels, side, descriptor.layout(), |v| [v]),
        ElementType::Float32 | ElementType::Other(_) => {
            reorder(pixels, side, descriptor.layout(), |v| (v as f32 / 255.0).to_ne_bytes())
        }
    };

    Ok(PreparedTensor {
        bytes,
        shape: descriptor.input_shape(),
        element_type: descriptor.input_type().clone(),
    })
}

/// Encode interleaved RGB pixels in the requested layout.
fn reorder<const N: usize>(
    pixels: &[u8],
    side: usize,
    layout: TensorLayout,
    encode: impl Fn(u8) -> [u8; N],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * N);
    match layout {
        TensorLayout::Nhwc => {
            for &v in pixels {
                out.extend_from_slice(&encode(v));
            }
        }
        TensorLayout::Nchw => {
            let plane = side * side;
            for c in 0..RGB_CHANNELS {
                for i in 0..plane {
                    out.extend_from_slice(&encode(pixels[i * RGB_CHANNELS + c]));
                }
            }
        }
    }
    out
}
