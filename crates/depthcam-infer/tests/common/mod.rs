#![allow(dead_code)]

use depthcam_infer::{
    Backend, Device, ElementType, InferError, ModelSource, Session, TensorSpec,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};

/// State shared between a mock backend, its sessions and the test.
#[derive(Default)]
pub struct MockScript {
    pub runs: AtomicUsize,
    pub fail_next: AtomicBool,
    pub panic_next: AtomicBool,
    pub last_input: Mutex<Vec<u8>>,
    pub last_shape: Mutex<Vec<usize>>,
    release: Mutex<Option<mpsc::Receiver<()>>>,
}

impl MockScript {
    /// Make every run wait for one message on the returned sender.
    pub fn hold_runs(&self) -> mpsc::Sender<()> {
        let (tx, rx) = mpsc::channel();
        *self.release.lock().unwrap() = Some(rx);
        tx
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

pub struct MockBackend {
    pub input: TensorSpec,
    pub output: TensorSpec,
    pub output_bytes: Vec<u8>,
    pub reject_gpu: bool,
    pub script: Arc<MockScript>,
}

impl MockBackend {
    /// NHWC float model with a float output of `output_side`, returning `values`.
    pub fn float(input_side: i64, output_side: i64, values: &[f32]) -> Self {
        Self {
            input: spec("input", vec![1, input_side, input_side, 3], ElementType::Float32),
            output: spec("depth", vec![1, output_side, output_side], ElementType::Float32),
            output_bytes: values.iter().flat_map(|v| v.to_ne_bytes()).collect(),
            reject_gpu: false,
            script: Arc::new(MockScript::default()),
        }
    }

    /// NHWC uint8 model with a uint8 output of `output_side`, returning `values`.
    pub fn quantized(input_side: i64, output_side: i64, values: &[u8]) -> Self {
        Self {
            input: spec("input", vec![1, input_side, input_side, 3], ElementType::Uint8),
            output: spec("depth", vec![1, output_side, output_side, 1], ElementType::Uint8),
            output_bytes: values.to_vec(),
            reject_gpu: false,
            script: Arc::new(MockScript::default()),
        }
    }

    pub fn with_input_shape(mut self, shape: Vec<i64>) -> Self {
        self.input.shape = shape;
        self
    }

    pub fn with_output_shape(mut self, shape: Vec<i64>) -> Self {
        self.output.shape = shape;
        self
    }

    pub fn with_output_type(mut self, element_type: ElementType) -> Self {
        self.output.element_type = element_type;
        self
    }

    pub fn rejecting_gpu(mut self) -> Self {
        self.reject_gpu = true;
        self
    }
}

pub fn spec(name: &str, shape: Vec<i64>, element_type: ElementType) -> TensorSpec {
    TensorSpec {
        name: name.to_string(),
        shape,
        element_type,
    }
}

pub fn memory_model() -> ModelSource {
    ModelSource::Memory {
        name: "mock-depth".to_string(),
        bytes: vec![0; 4],
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn load_model(
        &self,
        _model: &ModelSource,
        device: &Device,
    ) -> Result<Box<dyn Session>, InferError> {
        if self.reject_gpu && matches!(device, Device::Gpu { .. }) {
            return Err(InferError::UnsupportedDevice(*device));
        }
        Ok(Box::new(MockSession {
            input: self.input.clone(),
            output: self.output.clone(),
            output_bytes: self.output_bytes.clone(),
            device: *device,
            script: Arc::clone(&self.script),
        }))
    }
}

pub struct MockSession {
    input: TensorSpec,
    output: TensorSpec,
    output_bytes: Vec<u8>,
    device: Device,
    script: Arc<MockScript>,
}

impl Session for MockSession {
    fn input(&self) -> &TensorSpec {
        &self.input
    }

    fn output(&self) -> &TensorSpec {
        &self.output
    }

    fn device(&self) -> Device {
        self.device
    }

    fn run(&mut self, input: &[u8], shape: &[usize], output: &mut [u8]) -> Result<(), InferError> {
        self.script.runs.fetch_add(1, Ordering::SeqCst);
        *self.script.last_input.lock().unwrap() = input.to_vec();
        *self.script.last_shape.lock().unwrap() = shape.to_vec();

        if let Some(rx) = self.script.release.lock().unwrap().as_ref() {
            rx.recv().ok();
        }
        if self.script.panic_next.swap(false, Ordering::SeqCst) {
            panic!("mock session panicked");
        }
        if self.script.fail_next.swap(false, Ordering::SeqCst) {
            return Err(InferError::Inference("mock failure".to_string()));
        }
        if self.output_bytes.len() != output.len() {
            return Err(InferError::Inference(format!(
                "mock output holds {} bytes, expected {}",
                self.output_bytes.len(),
                output.len()
            )));
        }
        output.copy_from_slice(&self.output_bytes);
        Ok(())
    }
}
