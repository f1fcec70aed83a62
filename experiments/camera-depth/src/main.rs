mod view;

use depthcam_base::{RgbFrame, init_stdout_logger};
use depthcam_camera::{Camera, CameraConfig, StillCamera, V4l2Camera};
use depthcam_infer::{
    DepthConfig, DepthEstimator, DepthStream, OnnxBackend, model_source_from_env,
};
use minifb::{Key, Window, WindowOptions};
use std::env;
use view::{side_by_side, status_title};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// Replays this image instead of opening a capture device when set.
const STILL_ENV: &str = "DEPTHCAM_STILL";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let source = model_source_from_env()?;
    let config = DepthConfig::from_env()?;

    log::info!("Camera Depth Experiment");
    log::info!("Model: {:?}", source);
    log::info!("Device: {}, palette: {}", config.device(), config.palette());

    let estimator = DepthEstimator::new(source, &OnnxBackend, &config)?;
    let stream = DepthStream::new(estimator, &config)?;

    match env::var(STILL_ENV) {
        Ok(path) => {
            log::info!("Replaying {}", path);
            run(StillCamera::from_file(path, 30)?, stream).await
        }
        Err(_) => {
            let camera_config = CameraConfig::from_env()
                .with_width(WIDTH)
                .with_height(HEIGHT);
            log::info!("Opening {}", camera_config.device());
            run(V4l2Camera::new(camera_config)?, stream).await
        }
    }
}

async fn run<C: Camera>(
    mut camera: C,
    mut stream: DepthStream,
) -> Result<(), Box<dyn std::error::Error>> {
    let first = camera.recv().await?;
    let (width, height) = first.dimensions();

    let mut window = Window::new(
        &status_title(None, 0),
        width * 2,
        height,
        WindowOptions::default(),
    )?;
    window.set_target_fps(30);

    let mut depth = RgbFrame::filled(width, height, [0, 0, 0])?;
    let mut frame = first;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        stream.on_frame(frame.clone());

        while let Some(result) = stream.try_recv() {
            match result {
                Ok(result) => {
                    window.set_title(&status_title(Some(result.latency_ms()), stream.dropped()));
                    depth = result.into_depth();
                }
                Err(e) => log::warn!("depth estimation failed: {}", e),
            }
        }

        let (buffer, w, h) = side_by_side(&frame, &depth)?;
        window.update_with_buffer(&buffer, w, h)?;

        frame = camera.recv().await?;
    }

    log::info!(
        "Exiting: {} frames estimated, {} dropped",
        stream.accepted(),
        stream.dropped()
    );
    stream.close().await;
    Ok(())
}
