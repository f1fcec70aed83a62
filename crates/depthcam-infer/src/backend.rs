use crate::{Device, InferError, ModelSource, Session};

pub trait Backend {
    fn name(&self) -> &str;

    /// Build a session for `model` on `device`.
    ///
    /// Returns `InferError::UnsupportedDevice` when the device cannot be
    /// configured, so the caller can move on to the next candidate, and
    /// `InferError::ModelLoad` when the model itself is unusable.
    fn load_model(&self, model: &ModelSource, device: &Device)
    -> Result<Box<dyn Session>, InferError>;
}
