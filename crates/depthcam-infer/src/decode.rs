use crate::{ElementType, InferError};
use depthcam_image::GrayImage;

/// Range of the raw float output before it was scaled to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

/// Square grid of 8-bit depth intensities, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    side: usize,
    intensities: Vec<u8>,
    stats: Option<DepthStats>,
}

impl DepthGrid {
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn intensities(&self) -> &[u8] {
        &self.intensities
    }

    /// Raw value statistics, present only for float outputs.
    pub fn stats(&self) -> Option<DepthStats> {
        self.stats
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.side || y >= self.side {
            return None;
        }
        Some(self.intensities[y * self.side + x])
    }

    pub fn to_gray_image(&self) -> Result<GrayImage, InferError> {
        GrayImage::from_raw(self.side as u32, self.side as u32, self.intensities.clone())
            .ok_or_else(|| InferError::ShapeMismatch {
                expected: format!("{} intensities", self.side * self.side),
                got: format!("{}", self.intensities.len()),
            })
    }
}

/// Decode a raw output buffer of `side * side` elements into intensities.
///
/// Float outputs are min-max scaled per call; quantized outputs are inverted.
/// Types other than `Uint8` are read as native-endian f32.
///
/// # Errors
///
/// Returns `InferError::Inference` if the buffer length does not match
/// `side * side * bytes_per_element`.
pub fn decode_output(
    bytes: &[u8],
    side: usize,
    element_type: &ElementType,
) -> Result<DepthGrid, InferError> {
    let expected = side
        .checked_mul(side)
        .and_then(|n| n.checked_mul(element_type.bytes_per_element()))
        .ok_or_else(|| InferError::Inference(format!("output side {side} overflows")))?;
    if bytes.len() != expected {
        return Err(InferError::Inference(format!(
            "output buffer holds {} bytes, expected {expected} for {side}x{side} {element_type:?}",
            bytes.len()
        )));
    }

    let (intensities, stats) = match element_type {
        ElementType::Uint8 => (decode_quantized(bytes), None),
        ElementType::Float32 | ElementType::Other(_) => {
            let values: Vec<f32> = bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            let (intensities, stats) = decode_float(&values);
            log::debug!(
                "depth range: min={:.3}, max={:.3}, mean={:.3}",
                stats.min,
                stats.max,
                stats.mean
            );
            (intensities, Some(stats))
        }
    };

    Ok(DepthGrid {
        side,
        intensities,
        stats,
    })
}

/// Scale floats to `[0, 255]` by their own min and max. A flat input maps to all zeros.
pub fn decode_float(values: &[f32]) -> (Vec<u8>, DepthStats) {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mean = if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    };

    let range = max - min;
    let intensities = if range > 0.0 {
        values
            .iter()
            .map(|&v| ((v - min) / range * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect()
    } else {
        vec![0; values.len()]
    };

    (intensities, DepthStats { min, max, mean })
}

/// Inverts quantized outputs: `255 - v`.
pub fn decode_quantized(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&v| 255 - v).collect()
}
