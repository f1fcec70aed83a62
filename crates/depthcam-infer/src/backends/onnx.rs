use crate::{Backend, Device, ElementType, InferError, ModelSource, Session, TensorSpec};
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use ort::session::Session as OrtSession;
use ort::session::builder::SessionBuilder;
use ort::tensor::TensorElementType;
use ort::value::{TensorRef, ValueType};
use ort::{inputs, session::SessionOutputs};
use std::sync::OnceLock;

static ORT_INIT: OnceLock<()> = OnceLock::new();

fn ensure_ort_init() {
    ORT_INIT.get_or_init(|| {
        let _ = ort::init().with_name("depthcam").commit();
    });
}

/// ONNX Runtime backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct OnnxBackend;

impl OnnxBackend {
    fn configure(builder: SessionBuilder, device: &Device) -> Result<SessionBuilder, InferError> {
        match device {
            Device::Cpu => {
                log::debug!("[onnx] using CPU execution provider");
                Ok(builder)
            }
            #[cfg(feature = "cuda")]
            Device::Gpu { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                let ep = CUDAExecutionProvider::default()
                    .with_device_id(*device_id)
                    .build()
                    .error_on_failure();
                builder.with_execution_providers([ep]).map_err(|e| {
                    log::warn!("[onnx] CUDA device {} unavailable: {}", device_id, e);
                    InferError::UnsupportedDevice(*device)
                })
            }
            #[cfg(not(feature = "cuda"))]
            Device::Gpu { .. } => {
                log::warn!("[onnx] built without the `cuda` feature");
                Err(InferError::UnsupportedDevice(*device))
            }
            #[cfg(feature = "coreml")]
            Device::NeuralAccelerator => {
                use ort::execution_providers::CoreMLExecutionProvider;
                // Failed registration is fatal; a missing provider at run time falls back to CPU.
                builder
                    .with_execution_providers([CoreMLExecutionProvider::default().build()])
                    .map_err(|e| InferError::ModelLoad(format!("failed to register CoreML: {e}")))
            }
            #[cfg(not(feature = "coreml"))]
            Device::NeuralAccelerator => {
                log::warn!("[onnx] built without the `coreml` feature, using default execution");
                Ok(builder)
            }
        }
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(
        &self,
        model: &ModelSource,
        device: &Device,
    ) -> Result<Box<dyn Session>, InferError> {
        ensure_ort_init();

        let builder = OrtSession::builder().map_err(|e| {
            InferError::ModelLoad(format!("failed to create session builder: {e}"))
        })?;
        let builder = Self::configure(builder, device)?;

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load {}: {e}", path.display()))
            })?,
            ModelSource::Memory { name, bytes } => {
                builder.commit_from_memory(bytes).map_err(|e| {
                    InferError::ModelLoad(format!("failed to load {name} from memory: {e}"))
                })?
            }
        };

        let input = session
            .inputs
            .first()
            .ok_or_else(|| InferError::ModelLoad("model has no inputs".to_string()))
            .and_then(|input| tensor_spec(&input.name, &input.input_type))?;
        let output = session
            .outputs
            .first()
            .ok_or_else(|| InferError::ModelLoad("model has no outputs".to_string()))
            .and_then(|output| tensor_spec(&output.name, &output.output_type))?;

        Ok(Box::new(OnnxSession {
            session,
            device: *device,
            input,
            output,
        }))
    }
}

fn tensor_spec(name: &str, value_type: &ValueType) -> Result<TensorSpec, InferError> {
    match value_type {
        ValueType::Tensor { ty, shape, .. } => Ok(TensorSpec {
            name: name.to_string(),
            shape: shape.iter().copied().collect(),
            element_type: element_type(*ty),
        }),
        other => Err(InferError::ModelLoad(format!(
            "'{name}' is not a tensor: {other:?}"
        ))),
    }
}

fn element_type(ty: TensorElementType) -> ElementType {
    match ty {
        TensorElementType::Float32 => ElementType::Float32,
        TensorElementType::Uint8 => ElementType::Uint8,
        other => ElementType::Other(format!("{other:?}")),
    }
}

pub struct OnnxSession {
    session: OrtSession,
    device: Device,
    input: TensorSpec,
    output: TensorSpec,
}

impl Session for OnnxSession {
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
        let name = self.input.name.as_str();
        let outputs = match self.input.element_type {
            ElementType::Uint8 => {
                let array = ArrayViewD::from_shape(IxDyn(shape), input).map_err(|e| {
                    InferError::ShapeMismatch {
                        expected: format!("{shape:?}"),
                        got: format!("{} bytes ({e})", input.len()),
                    }
                })?;
                let tensor = TensorRef::from_array_view(array).map_err(|e| {
                    InferError::Inference(format!("failed to create tensor ref: {e}"))
                })?;
                self.session.run(inputs![name => tensor])
            }
            ElementType::Float32 | ElementType::Other(_) => {
                let array = bytes_to_ndarray(input, shape)?;
                let tensor = TensorRef::from_array_view(array.view()).map_err(|e| {
                    InferError::Inference(format!("failed to create tensor ref: {e}"))
                })?;
                self.session.run(inputs![name => tensor])
            }
        }
        .map_err(|e| InferError::Inference(format!("inference failed: {e}")))?;

        copy_output(&outputs, &self.output.element_type, output)
    }
}

/// Reinterpret native-endian f32 bytes as an ndarray of the given shape.
pub fn bytes_to_ndarray(bytes: &[u8], shape: &[usize]) -> Result<ArrayD<f32>, InferError> {
    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let len = values.len();
    ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| InferError::ShapeMismatch {
        expected: format!("{shape:?}"),
        got: format!("{len} values"),
    })
}

fn copy_output(
    outputs: &SessionOutputs<'_>,
    element_type: &ElementType,
    output: &mut [u8],
) -> Result<(), InferError> {
    let value = &outputs[0];
    match element_type {
        ElementType::Uint8 => {
            let (_, data) = value
                .try_extract_tensor::<u8>()
                .map_err(|e| InferError::Inference(format!("output is not u8: {e}")))?;
            check_len(data.len(), output.len())?;
            output.copy_from_slice(data);
        }
        ElementType::Float32 | ElementType::Other(_) => {
            let (_, data) = value
                .try_extract_tensor::<f32>()
                .map_err(|e| InferError::Inference(format!("output is not f32: {e}")))?;
            check_len(data.len() * 4, output.len())?;
            for (chunk, v) in output.chunks_exact_mut(4).zip(data) {
                chunk.copy_from_slice(&v.to_ne_bytes());
            }
        }
    }
    Ok(())
}

fn check_len(got: usize, expected: usize) -> Result<(), InferError> {
    if got != expected {
        return Err(InferError::Inference(format!(
            "output holds {got} bytes, expected {expected}"
        )));
    }
    Ok(())
}
