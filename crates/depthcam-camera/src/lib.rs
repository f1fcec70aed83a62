//! Frame sources for depthcam.
//!
//! Every source implements the async [`Camera`] trait and yields packed
//! [`RgbFrame`](depthcam_base::RgbFrame)s. V4L2 capture runs on its own OS
//! thread so a slow consumer never stalls the device; still images are
//! paced by a tokio interval.

pub mod config;
pub mod convert;
pub mod error;
pub mod still;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use error::CameraError;
pub use still::StillCamera;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
