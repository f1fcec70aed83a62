use crate::{DepthGrid, InferError};
use depthcam_base::RgbFrame;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Intensity to color lookup, one entry per 8-bit level.
pub type Lut = [[u8; 3]; 256];

/// Color ramps for depth maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Palette {
    /// Black through purple and orange to pale yellow. Red never decreases.
    #[default]
    Inferno,
    /// Blue to red: `r = v`, `g = v * 100 / 255`, `b = 255 - v`.
    Magma,
    /// Identity ramp.
    Grayscale,
}

const INFERNO_STOPS: [[u8; 3]; 9] = [
    [0, 0, 4],
    [31, 12, 72],
    [85, 15, 109],
    [136, 34, 106],
    [186, 54, 85],
    [227, 89, 51],
    [249, 140, 10],
    [249, 201, 50],
    [252, 255, 164],
];

static INFERNO: OnceLock<Lut> = OnceLock::new();
static MAGMA: OnceLock<Lut> = OnceLock::new();
static GRAYSCALE: OnceLock<Lut> = OnceLock::new();

impl Palette {
    /// The palette's lookup table, built on first use.
    pub fn lut(self) -> &'static Lut {
        match self {
            Palette::Inferno => INFERNO.get_or_init(|| build_lut(interpolate_stops)),
            Palette::Magma => MAGMA.get_or_init(|| {
                build_lut(|v| {
                    let v = v as u32;
                    [v as u8, (v * 100 / 255) as u8, (255 - v) as u8]
                })
            }),
            Palette::Grayscale => GRAYSCALE.get_or_init(|| build_lut(|v| [v, v, v])),
        }
    }

    pub fn color(self, intensity: u8) -> [u8; 3] {
        self.lut()[intensity as usize]
    }
}

fn build_lut(f: impl Fn(u8) -> [u8; 3]) -> Lut {
    let mut lut = [[0u8; 3]; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = f(i as u8);
    }
    lut
}

/// Piecewise-linear ramp through evenly spaced stops.
fn interpolate_stops(v: u8) -> [u8; 3] {
    let segments = (INFERNO_STOPS.len() - 1) as f32;
    let pos = v as f32 / 255.0 * segments;
    let idx = (pos.floor() as usize).min(INFERNO_STOPS.len() - 2);
    let t = pos - idx as f32;
    let (a, b) = (INFERNO_STOPS[idx], INFERNO_STOPS[idx + 1]);
    let mut rgb = [0u8; 3];
    for c in 0..3 {
        let value = a[c] as f32 + (b[c] as f32 - a[c] as f32) * t;
        rgb[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    rgb
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Palette::Inferno => write!(f, "inferno"),
            Palette::Magma => write!(f, "magma"),
            Palette::Grayscale => write!(f, "grayscale"),
        }
    }
}

impl FromStr for Palette {
    type Err = InferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inferno" => Ok(Palette::Inferno),
            "magma" => Ok(Palette::Magma),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Palette::Grayscale),
            _ => Err(InferError::Config(format!("unknown palette '{s}'"))),
        }
    }
}

/// Turn a depth grid into a color image of `width` x `height`.
///
/// The grid is rotated a quarter turn clockwise, scaled bilinearly to the
/// target size and mapped through the palette.
pub fn render_depth(
    grid: &DepthGrid,
    width: usize,
    height: usize,
    palette: Palette,
) -> Result<RgbFrame, InferError> {
    let gray = grid.to_gray_image()?;
    let rotated = depthcam_image::rotate_gray_90(&gray);
    let scaled = depthcam_image::resize_gray(&rotated, width as u32, height as u32);
    Ok(depthcam_image::gray_to_frame(&scaled, palette.lut())?)
}
