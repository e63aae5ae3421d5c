// One error type for the whole booth.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),        // Creating the window failed
    WindowUpdate(String),      // Pushing pixels to the window failed
    CameraInit(String),        // Opening/starting the camera failed
    Light(String),             // The LED strip rejected a write
    SnapshotNotReady,          // Snapshot requested before any frame was captured
    Encode(image::ImageError), // JPEG encoding failed
    Io(std::io::Error),        // Writing a snapshot file failed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::Light(s) => write!(f, "Light strip error: {s}"),
            Error::SnapshotNotReady => write!(f, "No frame captured yet; nothing to save"),
            Error::Encode(e) => write!(f, "Encode error: {e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Encode(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Encode(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
