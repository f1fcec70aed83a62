use crate::{Camera, CameraConfig, CameraError};
use depthcam_base::RgbFrame;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

type FrameResult = Result<RgbFrame, CameraError>;

/// Pixel formats the capture loop can turn into RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PixelFormat {
    Mjpg,
    Yuyv,
}

impl PixelFormat {
    fn fourcc(self) -> FourCC {
        match self {
            PixelFormat::Mjpg => FourCC::new(b"MJPG"),
            PixelFormat::Yuyv => FourCC::new(b"YUYV"),
        }
    }
}

/// V4L2 camera implementation.
pub struct V4l2Camera {
    config: CameraConfig,
    format: PixelFormat,
    width: u32,
    height: u32,
    device: Option<Device>,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("format", &self.format)
            .field("size", &(self.width, self.height))
            .field("running", &self.receiver.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<RgbFrame, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("Receiver not initialized".to_string()))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| CameraError::Channel("Channel closed".to_string()))?
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        // Dropping the receiver makes the next blocking_send fail, which ends the loop.
        drop(self.receiver.take());

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl V4l2Camera {
    /// Open the device at `config.device()`.
    ///
    /// MJPEG is requested first; devices that refuse it are retried with YUYV.
    /// The driver may adjust the resolution, the negotiated size is what
    /// frames will have.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the device cannot be opened or
    /// accepts neither pixel format.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())?;

        let mut negotiated = None;
        for candidate in [PixelFormat::Mjpg, PixelFormat::Yuyv] {
            let request = Format::new(config.width(), config.height(), candidate.fourcc());
            let format = Capture::set_format(&device, &request)?;
            if format.fourcc == candidate.fourcc() {
                negotiated = Some((candidate, format.width, format.height));
                break;
            }
        }
        let (format, width, height) = negotiated.ok_or_else(|| {
            CameraError::Device(format!(
                "{}: neither MJPG nor YUYV is supported",
                config.device()
            ))
        })?;

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        log::info!(
            "opened {} as {:?} {}x{} @ {} fps",
            config.device(),
            format,
            width,
            height,
            config.fps()
        );

        Ok(Self {
            config,
            format,
            width,
            height,
            device: Some(device),
            receiver: None,
            thread_handle: None,
        })
    }

    /// Start the capture thread on the first `recv()`.
    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("Device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count();
        let (tx, rx) = mpsc::channel(buffer_count as usize);
        let (format, width, height) = (self.format, self.width, self.height);

        let handle = thread::spawn(move || {
            if let Err(e) = Self::capture_loop(device, tx, buffer_count, format, width, height) {
                log::error!("capture thread error: {}", e);
            }
        });

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);

        Ok(())
    }

    fn capture_loop(
        device: Device,
        tx: mpsc::Sender<FrameResult>,
        buffer_count: u32,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count)?;

        loop {
            let (data, _metadata) = CaptureStream::next(&mut stream)?;

            // Per-frame decode failures go to the consumer, the stream keeps running.
            let frame = match format {
                PixelFormat::Mjpg => depthcam_image::decode_rgb(data).map_err(CameraError::from),
                PixelFormat::Yuyv => crate::convert::yuyv_to_rgb(data, width, height)
                    .ok_or_else(|| {
                        CameraError::Stream(format!(
                            "short YUYV buffer: {} bytes for {}x{}",
                            data.len(),
                            width,
                            height
                        ))
                    }),
            };

            if tx.blocking_send(frame).is_err() {
                break;
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Negotiated frame size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
