use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// The model could not be read, decoded or is structurally incompatible.
    ModelLoad(String),
    /// The runtime failed while executing the model. The pipeline stays usable.
    Inference(String),
    /// The caller's input was rejected before reaching the model.
    MalformedInput(String),
    /// The requested compute device cannot be configured on this runtime.
    UnsupportedDevice(Device),
    ShapeMismatch { expected: String, got: String },
    /// A configuration value (environment or string) could not be parsed.
    Config(String),
    /// The model handle was closed.
    Closed,
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Inference(msg) => write!(f, "inference error: {msg}"),
            InferError::MalformedInput(msg) => write!(f, "malformed input: {msg}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::Config(msg) => write!(f, "config error: {msg}"),
            InferError::Closed => write!(f, "model handle is closed"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<depthcam_base::FrameError> for InferError {
    fn from(err: depthcam_base::FrameError) -> Self {
        InferError::MalformedInput(err.to_string())
    }
}

impl From<depthcam_image::ImageError> for InferError {
    fn from(err: depthcam_image::ImageError) -> Self {
        InferError::MalformedInput(err.to_string())
    }
}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::ModelLoad(err.to_string())
    }
}
