use crate::preprocess::PreparedTensor;
use crate::{InferError, ModelDescriptor, Session};
use std::time::Instant;

/// Output buffer of one model run and the time the run took.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutput {
    bytes: Vec<u8>,
    latency_ms: u64,
}

impl RawOutput {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Wall-clock milliseconds spent inside the model call.
    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }
}

/// Run `session` once on `tensor`.
///
/// The output buffer is sized `output_side² * bytes_per_element` from the
/// descriptor. Only the session call is timed.
pub fn execute(
    session: &mut dyn Session,
    tensor: &PreparedTensor,
    descriptor: &ModelDescriptor,
) -> Result<RawOutput, InferError> {
    let side = descriptor.output_side();
    let len = side
        .checked_mul(side)
        .and_then(|n| n.checked_mul(descriptor.output_type().bytes_per_element()))
        .ok_or_else(|| InferError::Inference(format!("output side {side} overflows")))?;
    let mut bytes = vec![0u8; len];

    let start = Instant::now();
    session.run(tensor.bytes(), tensor.shape(), &mut bytes)?;
    let latency_ms = start.elapsed().as_millis() as u64;

    log::debug!("{} inference: {} ms", descriptor.name(), latency_ms);
    Ok(RawOutput { bytes, latency_ms })
}
