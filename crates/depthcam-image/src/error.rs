use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Io(String),
    Frame(depthcam_base::FrameError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Io(msg) => write!(f, "io error: {msg}"),
            ImageError::Frame(err) => write!(f, "frame error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<depthcam_base::FrameError> for ImageError {
    fn from(err: depthcam_base::FrameError) -> Self {
        ImageError::Frame(err)
    }
}

impl From<std::io::Error> for ImageError {
    fn from(err: std::io::Error) -> Self {
        ImageError::Io(err.to_string())
    }
}
