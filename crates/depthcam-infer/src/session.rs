use crate::{Device, InferError};

/// Element type of a model tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    Float32,
    Uint8,
    /// Any other runtime type, kept by name. Treated like `Float32`.
    Other(String),
}

impl ElementType {
    /// Buffer stride per element. Unknown types are assumed to be four bytes wide.
    pub fn bytes_per_element(&self) -> usize {
        match self {
            ElementType::Uint8 => 1,
            ElementType::Float32 | ElementType::Other(_) => 4,
        }
    }
}

/// Declared name, shape and type of a model input or output.
///
/// Dynamic dimensions are reported as values `<= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorSpec {
    pub name: String,
    pub shape: Vec<i64>,
    pub element_type: ElementType,
}

/// A loaded model, bound to one device.
pub trait Session: Send {
    /// First model input.
    fn input(&self) -> &TensorSpec;

    /// First model output.
    fn output(&self) -> &TensorSpec;

    /// Device the session was configured for.
    fn device(&self) -> Device;

    /// Run the model once.
    ///
    /// `input` holds the packed input tensor with the concrete `shape`.
    /// The first output is written to `output`, which the caller sizes from
    /// the declared output shape; a runtime result of a different byte length
    /// is an `InferError::Inference`.
    fn run(&mut self, input: &[u8], shape: &[usize], output: &mut [u8]) -> Result<(), InferError>;
}
