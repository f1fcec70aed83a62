use crate::CameraError;
use depthcam_base::RgbFrame;

/// Async frame source.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame.
    async fn recv(&mut self) -> Result<RgbFrame, CameraError>;
}
