// Opens the default camera and hands raw frames to the capture loop.
// A missed frame is normal (device busy, decode hiccup): `try_read` just
// returns None and the loop keeps showing the previous picture.

use log::{debug, info, warn};

use crate::error::Error;
use crate::types::{CapturedFrame, ChannelOrder};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Anything that can produce camera frames for the capture loop.
pub trait FrameSource {
    /// Grab one frame. None means "nothing this time", not an error.
    fn try_read(&mut self) -> Option<CapturedFrame>;

    /// Let go of the device. Safe to call more than once.
    fn release(&mut self);
}

// A small wrapper around nokhwa::Camera so the loop never sees nokhwa types.
pub struct CameraCapture {
    cam: Option<Camera>,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` at a target resolution (falls back if not exact).
    /// Failing here is fatal: the booth never starts without a camera.
    pub fn new(index: u32, width: u32, height: u32, fps: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            fps,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        info!("camera {index} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self {
            cam: Some(cam),
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for CameraCapture {
    fn try_read(&mut self) -> Option<CapturedFrame> {
        let cam = self.cam.as_mut()?;

        let frame = match cam.frame() {
            Ok(f) => f,
            Err(e) => {
                debug!("frame skipped: {e}");
                return None;
            }
        };

        // Decode to ImageBuffer<Rgb<u8>, Vec<u8>> (handles YUYV/MJPEG/etc).
        let rgb = match frame.decode_image::<RgbFormat>() {
            Ok(img) => img,
            Err(e) => {
                debug!("frame skipped, decode failed: {e}");
                return None;
            }
        };

        let (w, h) = rgb.dimensions();
        Some(CapturedFrame {
            width: w as usize,
            height: h as usize,
            order: ChannelOrder::Rgb,
            data: rgb.into_raw(),
        })
    }

    fn release(&mut self) {
        if let Some(mut cam) = self.cam.take() {
            if let Err(e) = cam.stop_stream() {
                warn!("camera release: {e}");
            }
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.release();
    }
}
