// Runtime knobs for the booth. There is no config file: everything is a
// constant here except the output directory, which comes from the CLI.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::LightColor;

/// Highest value a light channel (and its slider) may take.
/// Deliberately below the strip's 255 hardware maximum.
pub const CHANNEL_MAX: u8 = 200;

pub const CAMERA_INDEX: u32 = 0;
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;
pub const CAPTURE_FPS: u32 = 30;

pub const TICK_INTERVAL: Duration = Duration::from_millis(30);
pub const DISPLAY_DOWNSCALE: usize = 2;

pub const STRIP_LEN: usize = 24;
/// Color the ring light shows between startup and the first tick.
pub const WARMUP_COLOR: LightColor = LightColor { r: 150, g: 150, b: 150 };

pub const JPEG_QUALITY: u8 = 75;
pub const WINDOW_TITLE: &str = "PhotoBooth";

#[derive(Clone, Debug)]
pub struct BoothConfig {
    pub output_dir: PathBuf,
    pub camera_index: u32,
    pub capture_size: (u32, u32),
    pub tick_interval: Duration,
    pub downscale: usize,
    pub strip_len: usize,
    pub warmup_color: LightColor,
    pub jpeg_quality: u8,
}

impl BoothConfig {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir, ..Self::default() }
    }
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./"),
            camera_index: CAMERA_INDEX,
            capture_size: (CAPTURE_WIDTH, CAPTURE_HEIGHT),
            tick_interval: TICK_INTERVAL,
            downscale: DISPLAY_DOWNSCALE,
            strip_len: STRIP_LEN,
            warmup_color: WARMUP_COLOR,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}
