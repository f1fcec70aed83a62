use crate::colorize::{Palette, render_depth};
use crate::decode::{DepthStats, decode_output};
use crate::model::{ModelDescriptor, ModelHandle};
use crate::preprocess::preprocess;
use crate::{Backend, DepthConfig, InferError, ModelSource};
use depthcam_base::RgbFrame;

/// Colorized depth map and the model latency that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    depth: RgbFrame,
    latency_ms: u64,
    stats: Option<DepthStats>,
}

impl InferenceResult {
    /// Depth image at the input frame's width and height.
    pub fn depth(&self) -> &RgbFrame {
        &self.depth
    }

    pub fn into_depth(self) -> RgbFrame {
        self.depth
    }

    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    /// Raw output range, for float models.
    pub fn stats(&self) -> Option<DepthStats> {
        self.stats
    }
}

/// Monocular depth estimation pipeline
///
/// Runs preprocessing, model execution, output decoding and colorization
/// behind one `predict()` call.
#[derive(Debug)]
pub struct DepthEstimator {
    model: ModelHandle,
    palette: Palette,
}

impl DepthEstimator {
    /// Load `source` through `backend` with the device and palette in `config`.
    pub fn new(
        source: ModelSource,
        backend: &dyn Backend,
        config: &DepthConfig,
    ) -> Result<Self, InferError> {
        let model = ModelHandle::load(&source, backend, config)?;
        Ok(Self {
            model,
            palette: config.palette(),
        })
    }

    /// Set the palette (builder pattern)
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn descriptor(&self) -> &ModelDescriptor {
        self.model.descriptor()
    }

    /// Estimate depth for one frame.
    ///
    /// # Errors
    ///
    /// - `InferError::Closed` after [`close`](Self::close)
    /// - `InferError::MalformedInput` for zero-area frames
    /// - `InferError::Inference` if the runtime fails or returns a wrongly sized buffer
    pub fn predict(&mut self, frame: &RgbFrame) -> Result<InferenceResult, InferError> {
        if self.model.is_closed() {
            return Err(InferError::Closed);
        }

        let tensor = preprocess(frame, self.model.descriptor())?;
        let raw = self.model.execute(&tensor)?;

        let descriptor = self.model.descriptor();
        let grid = decode_output(raw.bytes(), descriptor.output_side(), descriptor.output_type())?;
        let depth = render_depth(&grid, frame.width(), frame.height(), self.palette)?;

        Ok(InferenceResult {
            depth,
            latency_ms: raw.latency_ms(),
            stats: grid.stats(),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.model.is_closed()
    }

    /// Release the model. Safe to call more than once.
    pub fn close(&mut self) {
        self.model.close();
    }
}
