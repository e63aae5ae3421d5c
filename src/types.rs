// Core types shared by the capture loop, the transcoder and the window.

use image::RgbaImage;
use smart_leds::RGB8;

use crate::config::CHANNEL_MAX;

/// Order of the three interleaved channels in a raw camera frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    // nokhwa always decodes to RGB; BGR only shows up in synthetic test frames.
    #[cfg(test)]
    Bgr,
}

/// One raw frame exactly as the device handed it over: 3 bytes per pixel,
/// row-major, no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedFrame {
    pub width: usize,
    pub height: usize,
    pub order: ChannelOrder,
    pub data: Vec<u8>,     // length = width * height * 3
}

impl CapturedFrame {
    /// Returns (r, g, b) of the pixel at (x, y), whatever the native order.
    #[inline]
    pub fn rgb_at(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let i = (y * self.width + x) * 3;
        let (a, b, c) = (self.data[i], self.data[i + 1], self.data[i + 2]);
        match self.order {
            ChannelOrder::Rgb => (a, b, c),
            #[cfg(test)]
            ChannelOrder::Bgr => (c, b, a),
        }
    }
}

/// What the window shows. Visual: one preview image, replaced every tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Full-resolution copy of the last good frame; this is what a snapshot saves.
pub type RetainedImage = RgbaImage;

/// Ring-light color. Each channel is kept within [0, CHANNEL_MAX].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LightColor {
    pub const OFF: LightColor = LightColor { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r: r.min(CHANNEL_MAX), g: g.min(CHANNEL_MAX), b: b.min(CHANNEL_MAX) }
    }

    /// Convert raw slider readings into a color.
    /// Sliders may report fractional or out-of-range values; each one is
    /// rounded and clamped into [0, CHANNEL_MAX]. NaN reads as 0.
    pub fn from_sliders(pos: SliderPositions) -> Self {
        Self::new(
            slider_to_channel(pos.r),
            slider_to_channel(pos.g),
            slider_to_channel(pos.b),
        )
    }
}

impl From<LightColor> for RGB8 {
    fn from(c: LightColor) -> Self {
        RGB8::new(c.r, c.g, c.b)
    }
}

fn slider_to_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, CHANNEL_MAX as f32) as u8
}

/// The three color sliders as the UI reports them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SliderPositions {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}
