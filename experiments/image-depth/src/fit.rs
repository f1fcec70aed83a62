/// Largest size with the same aspect ratio that fits in `max_w` x `max_h`.
/// Images that already fit are left alone.
pub fn fit_within(width: usize, height: usize, max_w: usize, max_h: usize) -> (usize, usize) {
    if width == 0 || height == 0 || (width <= max_w && height <= max_h) {
        return (width, height);
    }
    let scale = f64::min(max_w as f64 / width as f64, max_h as f64 / height as f64);
    (
        ((width as f64 * scale).round() as usize).max(1),
        ((height as f64 * scale).round() as usize).max(1),
    )
}
