use crate::{Camera, CameraConfig, CameraError};
use depthcam_base::RgbFrame;
use std::path::Path;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

/// Replays one image as a fixed-rate frame stream.
///
/// Useful on hosts without a capture device: the depth pipeline sees the
/// same sequence of `recv()` calls it would get from a real camera.
#[derive(Debug)]
pub struct StillCamera {
    frame: RgbFrame,
    period: Duration,
    interval: Option<Interval>,
    limit: Option<usize>,
    emitted: usize,
}

impl StillCamera {
    /// Emit `frame` at `fps` frames per second. Zero is treated as one.
    pub fn new(frame: RgbFrame, fps: u32) -> Self {
        let period = CameraConfig::default().with_fps(fps).frame_interval();
        Self {
            frame,
            period,
            interval: None,
            limit: None,
            emitted: 0,
        }
    }

    /// Decode the image at `path` and replay it.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Decode` if the file is missing or not a supported image.
    pub fn from_file(path: impl AsRef<Path>, fps: u32) -> Result<Self, CameraError> {
        let frame = depthcam_image::load_rgb(path)?;
        log::debug!(
            "still camera: {}x{} at {} fps",
            frame.width(),
            frame.height(),
            fps.max(1)
        );
        Ok(Self::new(frame, fps))
    }

    /// Stop after `count` frames; later `recv()` calls fail with `CameraError::Channel`.
    pub fn with_limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of frames handed out so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl Camera for StillCamera {
    async fn recv(&mut self) -> Result<RgbFrame, CameraError> {
        if self.limit.is_some_and(|limit| self.emitted >= limit) {
            return Err(CameraError::Channel("still image exhausted".to_string()));
        }

        // Created lazily so construction does not need a runtime.
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;

        self.emitted += 1;
        Ok(self.frame.clone())
    }
}
