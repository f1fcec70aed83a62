use crate::engine::{self, RawOutput};
use crate::preprocess::PreparedTensor;
use crate::{Backend, DepthConfig, Device, ElementType, InferError, ModelSource, Session};

/// Memory order of the model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorLayout {
    /// `[1, H, W, 3]`, channels interleaved.
    Nhwc,
    /// `[1, 3, H, W]`, one plane per channel.
    Nchw,
}

/// What the pipeline needs to know about a loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    name: String,
    device: Device,
    input_side: usize,
    output_side: usize,
    input_type: ElementType,
    output_type: ElementType,
    layout: TensorLayout,
}

impl ModelDescriptor {
    /// Derive a descriptor from declared tensor shapes.
    ///
    /// Inputs must be rank 4 with three channels. Outputs may be `[H, W]`,
    /// `[1, H, W]`, `[1, 1, H, W]` or `[1, H, W, 1]`. Spatial dimensions must
    /// be square; dynamic ones resolve to `fallback_side` for the input and to
    /// the input side for the output.
    pub fn from_session(
        name: String,
        session: &dyn Session,
        fallback_side: usize,
    ) -> Result<Self, InferError> {
        let input = session.input();
        let output = session.output();
        let (input_side, layout) = parse_input_shape(&input.shape, fallback_side)?;
        let output_side = parse_output_side(&output.shape, input_side)?;

        Ok(Self {
            name,
            device: session.device(),
            input_side,
            output_side,
            input_type: input.element_type.clone(),
            output_type: output.element_type.clone(),
            layout,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device the session actually runs on after fallback.
    pub fn device(&self) -> Device {
        self.device
    }

    pub fn input_side(&self) -> usize {
        self.input_side
    }

    pub fn output_side(&self) -> usize {
        self.output_side
    }

    pub fn input_type(&self) -> &ElementType {
        &self.input_type
    }

    pub fn output_type(&self) -> &ElementType {
        &self.output_type
    }

    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    /// Concrete input shape with batch size one.
    pub fn input_shape(&self) -> Vec<usize> {
        let side = self.input_side;
        match self.layout {
            TensorLayout::Nhwc => vec![1, side, side, 3],
            TensorLayout::Nchw => vec![1, 3, side, side],
        }
    }
}

fn known(dim: i64) -> Option<usize> {
    (dim > 0).then_some(dim as usize)
}

/// Resolve a pair of spatial dimensions to one side length.
fn square_side(height: i64, width: i64, fallback: usize) -> Result<usize, InferError> {
    match (known(height), known(width)) {
        (Some(h), Some(w)) if h != w => Err(InferError::ModelLoad(format!(
            "spatial dimensions must be square, got {h}x{w}"
        ))),
        (Some(side), _) | (None, Some(side)) => Ok(side),
        (None, None) => Ok(fallback),
    }
}

/// Side length and layout of a rank-4 RGB input.
pub fn parse_input_shape(shape: &[i64], fallback: usize) -> Result<(usize, TensorLayout), InferError> {
    let [_, d1, d2, d3] = shape else {
        return Err(InferError::ModelLoad(format!(
            "input must be rank 4, got {shape:?}"
        )));
    };
    if *d3 == 3 {
        Ok((square_side(*d1, *d2, fallback)?, TensorLayout::Nhwc))
    } else if *d1 == 3 {
        Ok((square_side(*d2, *d3, fallback)?, TensorLayout::Nchw))
    } else {
        Err(InferError::ModelLoad(format!(
            "input must have 3 channels, got {shape:?}"
        )))
    }
}

/// Side length of a single-channel depth output.
pub fn parse_output_side(shape: &[i64], input_side: usize) -> Result<usize, InferError> {
    let (height, width) = match shape {
        [h, w] => (*h, *w),
        [_, h, w] => (*h, *w),
        [_, 1, h, w] => (*h, *w),
        [_, h, w, 1] => (*h, *w),
        _ => {
            return Err(InferError::ModelLoad(format!(
                "unsupported output shape {shape:?}"
            )));
        }
    };
    square_side(height, width, input_side)
}

/// A loaded model together with its descriptor.
pub struct ModelHandle {
    descriptor: ModelDescriptor,
    session: Option<Box<dyn Session>>,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("descriptor", &self.descriptor)
            .field("closed", &self.session.is_none())
            .finish()
    }
}

impl ModelHandle {
    /// Load `source` on the first device of `config.device()`'s fallback chain
    /// that the backend accepts.
    ///
    /// # Errors
    ///
    /// Returns `InferError::ModelLoad` if the model cannot be read or is not a
    /// depth model, and `InferError::UnsupportedDevice` if no candidate
    /// device could be configured.
    pub fn load(
        source: &ModelSource,
        backend: &dyn Backend,
        config: &DepthConfig,
    ) -> Result<Self, InferError> {
        let requested = config.device();
        let mut last_err = InferError::UnsupportedDevice(requested);

        for candidate in requested.fallback_chain() {
            match backend.load_model(source, &candidate) {
                Ok(session) => {
                    if candidate != requested {
                        log::warn!(
                            "{} unavailable on backend {}, running on {}",
                            requested,
                            backend.name(),
                            candidate
                        );
                    }
                    let descriptor = ModelDescriptor::from_session(
                        source.name(),
                        session.as_ref(),
                        config.fallback_side(),
                    )?;
                    log::info!(
                        "loaded {}: {} input {}x{} {:?} {:?}, output {}x{} {:?}",
                        descriptor.name(),
                        descriptor.device(),
                        descriptor.input_side(),
                        descriptor.input_side(),
                        descriptor.input_type(),
                        descriptor.layout(),
                        descriptor.output_side(),
                        descriptor.output_side(),
                        descriptor.output_type()
                    );
                    return Ok(Self {
                        descriptor,
                        session: Some(session),
                    });
                }
                Err(InferError::UnsupportedDevice(device)) => {
                    log::warn!("{} rejected {}", backend.name(), device);
                    last_err = InferError::UnsupportedDevice(device);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err)
    }

    pub fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    pub fn is_closed(&self) -> bool {
        self.session.is_none()
    }

    /// Run the model on a prepared tensor.
    pub fn execute(&mut self, tensor: &PreparedTensor) -> Result<RawOutput, InferError> {
        let session = self.session.as_deref_mut().ok_or(InferError::Closed)?;
        engine::execute(session, tensor, &self.descriptor)
    }

    /// Release the session. Later calls are no-ops.
    pub fn close(&mut self) {
        match self.session.take() {
            Some(session) => {
                drop(session);
                log::info!("closed {}", self.descriptor.name());
            }
            None => log::debug!("{} already closed", self.descriptor.name()),
        }
    }
}
