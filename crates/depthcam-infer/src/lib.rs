//! Monocular depth estimation.
//!
//! A [`DepthEstimator`] turns one RGB frame into a colorized depth image:
//! the frame is resized and packed for the model ([`preprocess`]), run
//! through a [`Session`] with latency measured ([`engine`]), decoded into an
//! 8-bit grid ([`decode`]) and finally rotated, scaled back and mapped
//! through a [`Palette`] ([`colorize`]). [`DepthStream`] puts a
//! [`FrameGate`] in front of the estimator for live sources.

pub mod backend;
pub mod backends;
pub mod colorize;
pub mod config;
pub mod decode;
pub mod device;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod gate;
pub mod model;
pub mod modelsource;
pub mod preprocess;
pub mod session;
pub mod stream;

pub use backend::Backend;
pub use backends::OnnxBackend;
pub use colorize::{Palette, render_depth};
pub use config::{DepthConfig, model_source_from_env};
pub use decode::{DepthGrid, DepthStats, decode_output};
pub use device::Device;
pub use engine::RawOutput;
pub use error::InferError;
pub use estimator::{DepthEstimator, InferenceResult};
pub use gate::{FrameGate, GatePermit, GateState, admit};
pub use model::{ModelDescriptor, ModelHandle, TensorLayout};
pub use modelsource::ModelSource;
pub use preprocess::{PreparedTensor, preprocess};
pub use session::{ElementType, Session, TensorSpec};
pub use stream::{DepthStream, StreamResult};
