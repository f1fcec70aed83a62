use crate::{Device, InferError, ModelSource, Palette};
use std::path::PathBuf;

/// Environment variable holding the model file path.
pub const MODEL_PATH_ENV: &str = "DEPTHCAM_MODEL_PATH";
/// Environment variable selecting the compute device (see [`Device`]'s `FromStr`).
pub const DEVICE_ENV: &str = "DEPTHCAM_DEVICE";
/// Environment variable selecting the palette (`inferno`, `magma`, `grayscale`).
pub const PALETTE_ENV: &str = "DEPTHCAM_PALETTE";

/// Side length assumed for models that declare dynamic spatial dimensions.
pub const DEFAULT_FALLBACK_SIDE: usize = 518;

/// Configuration for a depth estimator.
#[derive(Clone, Debug)]
pub struct DepthConfig {
    device: Device,
    palette: Palette,
    fallback_side: usize,
    result_capacity: usize,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            device: Device::Cpu,
            palette: Palette::Inferno,
            fallback_side: DEFAULT_FALLBACK_SIDE,
            result_capacity: 2,
        }
    }
}

impl DepthConfig {
    /// Defaults overridden by `DEPTHCAM_DEVICE` and `DEPTHCAM_PALETTE` when set.
    ///
    /// # Errors
    ///
    /// Returns `InferError::Config` if a variable is set to an unknown value.
    pub fn from_env() -> Result<Self, InferError> {
        let mut config = Self::default();
        if let Some(device) = env_value(DEVICE_ENV) {
            config = config.with_device(device.parse()?);
        }
        if let Some(palette) = env_value(PALETTE_ENV) {
            config = config.with_palette(palette.parse()?);
        }
        Ok(config)
    }

    /// Set the requested compute device.
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Set the palette used to colorize depth maps.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the side length used when the model's input size is dynamic.
    /// Zero is clamped to one.
    pub fn with_fallback_side(mut self, side: usize) -> Self {
        self.fallback_side = side.max(1);
        self
    }

    /// Set how many finished results a stream buffers before its worker blocks.
    pub fn with_result_capacity(mut self, capacity: usize) -> Self {
        self.result_capacity = capacity.max(1);
        self
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn fallback_side(&self) -> usize {
        self.fallback_side
    }

    pub fn result_capacity(&self) -> usize {
        self.result_capacity
    }
}

/// Model file named by `DEPTHCAM_MODEL_PATH`.
///
/// # Errors
///
/// Returns `InferError::Config` if the variable is unset or empty.
pub fn model_source_from_env() -> Result<ModelSource, InferError> {
    env_value(MODEL_PATH_ENV)
        .map(|path| ModelSource::File(PathBuf::from(path)))
        .ok_or_else(|| InferError::Config(format!("{MODEL_PATH_ENV} is not set")))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
