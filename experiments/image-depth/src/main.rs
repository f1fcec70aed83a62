mod fit;

use depthcam_base::{init_stdout_logger, log_fatal};
use depthcam_image::{frame_to_u32, hconcat, load_rgb, resize_rgb};
use depthcam_infer::{DepthConfig, DepthEstimator, OnnxBackend, model_source_from_env};
use fit::fit_within;
use minifb::{Key, Window, WindowOptions};
use std::env;

/// Half of the window width; each image is fitted into this box.
const MAX_PANE_WIDTH: usize = 800;
const MAX_PANE_HEIGHT: usize = 800;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let Some(image_path) = env::args().nth(1) else {
        log_fatal!("usage: image-depth <image>");
    };

    let source = model_source_from_env()?;
    let config = DepthConfig::from_env()?;
    let mut estimator = DepthEstimator::new(source, &OnnxBackend, &config)?;

    let image = load_rgb(&image_path)?;
    let (width, height) = fit_within(image.width(), image.height(), MAX_PANE_WIDTH, MAX_PANE_HEIGHT);
    let image = if (width, height) == image.dimensions() {
        image
    } else {
        resize_rgb(&image, width as u32, height as u32)?
    };

    let result = estimator.predict(&image)?;
    println!("{}: {} ms", image_path, result.latency_ms());
    if let Some(stats) = result.stats() {
        log::info!(
            "raw depth: min={:.3}, max={:.3}, mean={:.3}",
            stats.min,
            stats.max,
            stats.mean
        );
    }

    let composite = hconcat(&image, result.depth())?;
    let buffer = frame_to_u32(&composite);
    let (w, h) = composite.dimensions();

    let mut window = Window::new(
        &format!("Image Depth - {} ms - ESC to exit", result.latency_ms()),
        w,
        h,
        WindowOptions::default(),
    )?;
    window.set_target_fps(30);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&buffer, w, h)?;
    }

    estimator.close();
    Ok(())
}
