use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Busy,
}

/// Gate decision for callers that keep their own busy flag:
/// a frame is admitted only when nothing is in flight.
pub fn admit(busy: bool) -> bool {
    !busy
}

/// Lets at most one pipeline run be in flight.
///
/// Frames that arrive while a run is active are refused, not queued.
#[derive(Debug, Default)]
pub struct FrameGate {
    busy: AtomicBool,
}

impl FrameGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> GateState {
        if self.is_busy() {
            GateState::Busy
        } else {
            GateState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Switch `Idle -> Busy`. The returned permit switches back when dropped,
    /// including during unwinding.
    pub fn try_admit(self: &Arc<Self>) -> Option<GatePermit> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| GatePermit {
                gate: Arc::clone(self),
            })
    }
}

/// Proof of admission. Holds the gate busy until dropped.
#[derive(Debug)]
pub struct GatePermit {
    gate: Arc<FrameGate>,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
