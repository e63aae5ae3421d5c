// Raw camera frame -> what the window shows, and -> what a snapshot saves.
// Both functions are pure: same frame in, same pixels out.

use image::{Rgba, RgbaImage};

use crate::types::{CapturedFrame, FrameBuffer, RetainedImage};

/// Shrink the frame by `factor` in each direction and pack pixels as 0x00RRGGBB.
/// Each output pixel is the average of its `factor` x `factor` source block,
/// so a 2x reduction blends 4 pixels into 1. Trailing rows/columns that do not
/// fill a whole block are dropped (a 5-wide frame becomes 2 wide at factor 2).
pub fn to_display(frame: &CapturedFrame, factor: usize) -> FrameBuffer {
    let f = factor.max(1);
    let w = (frame.width / f).max(1).min(frame.width);
    let h = (frame.height / f).max(1).min(frame.height);

    let mut out = FrameBuffer::new(w, h);
    for oy in 0..h {
        for ox in 0..w {
            // Clamp the block to the frame so tiny frames still produce a pixel.
            let x_end = ((ox + 1) * f).min(frame.width);
            let y_end = ((oy + 1) * f).min(frame.height);
            let (mut sr, mut sg, mut sb, mut n) = (0u32, 0u32, 0u32, 0u32);
            for y in (oy * f)..y_end {
                for x in (ox * f)..x_end {
                    let (r, g, b) = frame.rgb_at(x, y);
                    sr += r as u32;
                    sg += g as u32;
                    sb += b as u32;
                    n += 1;
                }
            }
            let n = n.max(1);
            // Round to nearest rather than truncate
            let r = (sr + n / 2) / n;
            let g = (sg + n / 2) / n;
            let b = (sb + n / 2) / n;
            out.pixels[oy * w + ox] = (r << 16) | (g << 8) | b;
        }
    }
    out
}

/// Reorder channels into opaque RGBA at full resolution.
pub fn to_retained(frame: &CapturedFrame) -> RetainedImage {
    RgbaImage::from_fn(frame.width as u32, frame.height as u32, |x, y| {
        let (r, g, b) = frame.rgb_at(x as usize, y as usize);
        Rgba([r, g, b, 255])
    })
}
