use std::fmt;

/// Bytes per pixel of a packed RGB8 raster.
pub const RGB_CHANNELS: usize = 3;

#[derive(Debug, PartialEq)]
pub enum FrameError {
    SizeOverflow,
    SizeMismatch { expected: usize, got: usize },
    Empty { width: usize, height: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::SizeOverflow => write!(f, "frame dimensions overflow when multiplied"),
            FrameError::SizeMismatch { expected, got } => {
                write!(f, "frame size mismatch: expected {expected} bytes, got {got}")
            }
            FrameError::Empty { width, height } => {
                write!(f, "frame has zero area ({width}x{height})")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Packed RGB8 raster, row-major, 3 bytes per pixel.
///
/// Frames are immutable once built; everything downstream borrows them.
#[derive(Clone, PartialEq)]
pub struct RgbFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl fmt::Debug for RgbFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RgbFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn byte_len(width: usize, height: usize) -> Result<usize, FrameError> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(RGB_CHANNELS))
        .ok_or(FrameError::SizeOverflow)
}

impl RgbFrame {
    /// Wrap packed RGB bytes. The data length must equal `width * height * 3`.
    ///
    /// Zero-area frames are allowed here so that sources can report them;
    /// the inference pipeline rejects them separately.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        let expected = byte_len(width, height)?;
        if expected != data.len() {
            return Err(FrameError::SizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self, FrameError> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> [u8; 3],
    ) -> Result<Self, FrameError> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fails with `FrameError::Empty` when either dimension is zero.
    pub fn ensure_nonempty(&self) -> Result<(), FrameError> {
        if self.is_empty() {
            return Err(FrameError::Empty {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGB triple at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * RGB_CHANNELS;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len_overflow() {
        assert_eq!(byte_len(usize::MAX, 2), Err(FrameError::SizeOverflow));
    }

    #[test]
    fn test_debug_omits_pixel_data() {
        let frame = RgbFrame::filled(4, 2, [1, 2, 3]).unwrap();
        let text = format!("{:?}", frame);
        assert!(text.contains("bytes: 24"));
        assert!(!text.contains("[1, 2, 3"));
    }
}
