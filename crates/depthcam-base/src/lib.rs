pub mod frame;
pub mod logging;

pub use frame::{FrameError, RGB_CHANNELS, RgbFrame};
pub use logging::{StdoutLogger, init_stdout_logger, max_level_from_env};

// Re-export log crate so downstream crates can use depthcam_base::log::*
pub use log;
