use crate::gate::{FrameGate, GateState};
use crate::{DepthConfig, DepthEstimator, InferError, InferenceResult};
use depthcam_base::RgbFrame;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type StreamResult = Result<InferenceResult, InferError>;

/// Drives a [`DepthEstimator`] from a continuous frame source.
///
/// Each accepted frame runs on tokio's blocking pool; frames offered while a
/// run is in flight are dropped. Results arrive on [`recv`](Self::recv) in
/// acceptance order.
pub struct DepthStream {
    estimator: Arc<Mutex<DepthEstimator>>,
    gate: Arc<FrameGate>,
    runtime: Handle,
    results_tx: mpsc::Sender<StreamResult>,
    results_rx: mpsc::Receiver<StreamResult>,
    in_flight: Option<JoinHandle<()>>,
    accepted: u64,
    dropped: u64,
}

impl std::fmt::Debug for DepthStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthStream")
            .field("state", &self.gate.state())
            .field("accepted", &self.accepted)
            .field("dropped", &self.dropped)
            .finish()
    }
}

impl DepthStream {
    /// Wrap `estimator` on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `InferError::Config` when called outside a tokio runtime.
    pub fn new(estimator: DepthEstimator, config: &DepthConfig) -> Result<Self, InferError> {
        let runtime = Handle::try_current()
            .map_err(|e| InferError::Config(format!("depth stream needs a tokio runtime: {e}")))?;
        Ok(Self::with_runtime(estimator, config, runtime))
    }

    pub fn with_runtime(estimator: DepthEstimator, config: &DepthConfig, runtime: Handle) -> Self {
        let (results_tx, results_rx) = mpsc::channel(config.result_capacity());
        Self {
            estimator: Arc::new(Mutex::new(estimator)),
            gate: FrameGate::new(),
            runtime,
            results_tx,
            results_rx,
            in_flight: None,
            accepted: 0,
            dropped: 0,
        }
    }

    /// Offer a frame. Returns `false` if a run is in flight and the frame was dropped.
    pub fn on_frame(&mut self, frame: RgbFrame) -> bool {
        let Some(permit) = self.gate.try_admit() else {
            self.dropped += 1;
            log::debug!("depth busy, dropped frame ({} total)", self.dropped);
            return false;
        };
        self.accepted += 1;

        let estimator = Arc::clone(&self.estimator);
        let tx = self.results_tx.clone();
        self.in_flight = Some(self.runtime.spawn_blocking(move || {
            // The estimator stays locked until the result is sent, so the next
            // run cannot overtake this one once the gate reopens.
            let mut guard = estimator.lock().unwrap_or_else(PoisonError::into_inner);
            let result = guard.predict(&frame);
            if let Err(e) = &result {
                log::warn!("depth run failed: {}", e);
            }
            drop(permit);
            let _ = tx.blocking_send(result);
            drop(guard);
        }));
        true
    }

    /// Next finished result.
    pub async fn recv(&mut self) -> Option<StreamResult> {
        self.results_rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<StreamResult> {
        self.results_rx.try_recv().ok()
    }

    /// Wait for the in-flight run, if any.
    ///
    /// The run cannot finish while the result channel is full, so drain
    /// [`recv`](Self::recv) when more than `result_capacity` results are pending.
    pub async fn wait_idle(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                log::error!("depth run aborted: {}", e);
            }
        }
    }

    /// Wait for the in-flight run, then close the model. Safe to call twice.
    pub async fn close(&mut self) {
        self.wait_idle().await;
        self.estimator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .close();
    }

    pub fn state(&self) -> GateState {
        self.gate.state()
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Frames admitted so far.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Frames refused because a run was in flight.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
