use crate::InferError;
use std::fmt;
use std::str::FromStr;

/// Compute device a model session is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Device {
    #[default]
    Cpu,
    Gpu { device_id: i32 },
    /// The platform's neural accelerator (CoreML on Apple hardware).
    NeuralAccelerator,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Gpu { device_id } => write!(f, "GPU(device_id={device_id})"),
            Device::NeuralAccelerator => write!(f, "NeuralAccelerator"),
        }
    }
}

impl Device {
    /// Candidates tried in order when loading a model for this device.
    ///
    /// A GPU request degrades to CPU. The neural accelerator gets no explicit
    /// fallback because the runtime places unsupported nodes on the CPU itself.
    pub fn fallback_chain(&self) -> Vec<Device> {
        match self {
            Device::Gpu { .. } => vec![*self, Device::Cpu],
            Device::NeuralAccelerator => vec![Device::NeuralAccelerator],
            Device::Cpu => vec![Device::Cpu],
        }
    }
}

impl FromStr for Device {
    type Err = InferError;

    /// Accepts `cpu`, `gpu`, `gpu:<id>`, `cuda`, `cuda:<id>`, `npu`, `coreml`, `neural`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        let (kind, id) = match value.split_once(':') {
            Some((kind, id)) => (kind, Some(id)),
            None => (value.as_str(), None),
        };
        match (kind, id) {
            ("cpu", None) => Ok(Device::Cpu),
            ("gpu" | "cuda", None) => Ok(Device::Gpu { device_id: 0 }),
            ("gpu" | "cuda", Some(id)) => id
                .parse()
                .map(|device_id| Device::Gpu { device_id })
                .map_err(|_| InferError::Config(format!("invalid GPU index in '{s}'"))),
            ("npu" | "coreml" | "neural", None) => Ok(Device::NeuralAccelerator),
            _ => Err(InferError::Config(format!("unknown device '{s}'"))),
        }
    }
}
