use depthcam_infer::{FrameGate, GateState, admit};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_admit_helper() {
    assert!(admit(false));
    assert!(!admit(true));
}

#[test]
fn test_gate_cycle() {
    let gate = FrameGate::new();
    assert_eq!(gate.state(), GateState::Idle);

    let permit = gate.try_admit().unwrap();
    assert_eq!(gate.state(), GateState::Busy);
    assert!(gate.try_admit().is_none());

    drop(permit);
    assert_eq!(gate.state(), GateState::Idle);
    assert!(gate.try_admit().is_some());
}

#[test]
fn test_gate_reopens_after_panic() {
    let gate = FrameGate::new();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _permit = gate.try_admit().unwrap();
        panic!("run failed");
    }));

    assert!(result.is_err());
    assert!(!gate.is_busy());
}

#[test]
fn test_single_admission_under_contention() {
    let gate = FrameGate::new();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let gate = Arc::clone(&gate);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let permit = gate.try_admit();
                let admitted = permit.is_some();
                // Hold until every thread has tried.
                barrier.wait();
                admitted
            })
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&a| a)
        .count();
    assert_eq!(admitted, 1);
    assert_eq!(gate.state(), GateState::Idle);
}
