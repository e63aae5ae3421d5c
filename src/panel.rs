// Control panel under the preview: three color sliders and the snapshot button.
// Visual: drag a slider with the left mouse button to change the ring light;
// click "SNAPSHOT!" to save the frame on screen.

use crate::config::CHANNEL_MAX;
use crate::draw::{Rect, draw_text_5x7, fill_rect, outline_rect, text_width_5x7};
use crate::types::{FrameBuffer, SliderPositions};

pub const PANEL_HEIGHT: usize = 64;
/// The panel needs this much width even when the preview is narrower.
pub const PANEL_MIN_WIDTH: usize = 240;

const MARGIN: usize = 8;
const TRACK_HEIGHT: usize = 8;
const BUTTON_HEIGHT: usize = 22;

const PANEL_BG: u32 = 0x00_20_20_20;
const TRACK_BG: u32 = 0x00_40_40_40;
const TEXT: u32 = 0x00_FF_FF_FF;
const BUTTON_BG: u32 = 0x00_30_30_30;
const BUTTON_PRESSED: u32 = 0x00_50_50_50;

struct Slider {
    label: char,
    fill: u32,
    track: Rect,
    value: f32,
}

impl Slider {
    /// Map a mouse x onto [0, CHANNEL_MAX] in whole steps.
    fn set_from_x(&mut self, mx: usize) {
        let span = self.track.w.saturating_sub(1).max(1) as f32;
        let t = (mx.saturating_sub(self.track.x) as f32 / span).clamp(0.0, 1.0);
        self.value = (t * CHANNEL_MAX as f32).round();
    }

    /// Grab area: the track plus the label row above it.
    fn grab_area(&self) -> Rect {
        Rect { x: self.track.x, y: self.track.y.saturating_sub(10), w: self.track.w, h: self.track.h + 12 }
    }

    fn draw(&self, fb: &mut FrameBuffer) {
        let t = &self.track;
        draw_text_5x7(fb, t.x as i32, t.y as i32 - 10, &format!("{} {}", self.label, self.value as u8), TEXT);
        fill_rect(fb, *t, TRACK_BG);
        let filled = (t.w as f32 * self.value / CHANNEL_MAX as f32).round() as usize;
        fill_rect(fb, Rect { w: filled.min(t.w), ..*t }, self.fill);
        outline_rect(fb, *t, TEXT);
    }
}

pub struct ControlPanel {
    area: Rect,
    sliders: [Slider; 3],
    button: Rect,
    dragging: Option<usize>,
    pressed_on_button: bool,
    was_down: bool,
}

impl ControlPanel {
    /// Lay the panel out across `width` pixels starting at row `top`.
    pub fn new(top: usize, width: usize) -> Self {
        let col_w = (width.saturating_sub(MARGIN) / 3).max(1);
        let track_w = col_w.saturating_sub(MARGIN).max(1);
        let track_y = top + MARGIN + 10;
        let slider = |i: usize, label: char, fill: u32| Slider {
            label,
            fill,
            track: Rect { x: MARGIN + i * col_w, y: track_y, w: track_w, h: TRACK_HEIGHT },
            value: 0.0,
        };
        Self {
            area: Rect { x: 0, y: top, w: width, h: PANEL_HEIGHT },
            sliders: [
                slider(0, 'R', 0x00_C0_30_30),
                slider(1, 'G', 0x00_30_C0_30),
                slider(2, 'B', 0x00_30_30_C0),
            ],
            button: Rect {
                x: MARGIN,
                y: track_y + TRACK_HEIGHT + 6,
                w: width.saturating_sub(2 * MARGIN).max(1),
                h: BUTTON_HEIGHT,
            },
            dragging: None,
            pressed_on_button: false,
            was_down: false,
        }
    }

    /// Current slider readings, as the UI holds them.
    pub fn positions(&self) -> SliderPositions {
        SliderPositions {
            r: self.sliders[0].value,
            g: self.sliders[1].value,
            b: self.sliders[2].value,
        }
    }

    /// Feed one frame of mouse state. Returns true when the snapshot button
    /// was clicked (pressed and released over the button).
    pub fn handle_mouse(&mut self, pos: Option<(usize, usize)>, down: bool) -> bool {
        let pressed = down && !self.was_down;
        let released = !down && self.was_down;
        self.was_down = down;

        let mut clicked = false;
        if let Some((mx, my)) = pos {
            if pressed {
                self.dragging = self.sliders.iter().position(|s| s.grab_area().contains(mx, my));
                self.pressed_on_button = self.button.contains(mx, my);
            }
            if down {
                if let Some(i) = self.dragging {
                    self.sliders[i].set_from_x(mx);
                }
            }
            if released && self.pressed_on_button && self.button.contains(mx, my) {
                clicked = true;
            }
        }
        if !down {
            self.dragging = None;
            self.pressed_on_button = false;
        }
        clicked
    }

    pub fn draw(&self, fb: &mut FrameBuffer) {
        fill_rect(fb, self.area, PANEL_BG);
        for s in &self.sliders {
            s.draw(fb);
        }

        let bg = if self.pressed_on_button { BUTTON_PRESSED } else { BUTTON_BG };
        fill_rect(fb, self.button, bg);
        outline_rect(fb, self.button, TEXT);
        let label = "SNAPSHOT!";
        let lx = self.button.x + self.button.w.saturating_sub(text_width_5x7(label)) / 2;
        let ly = self.button.y + (self.button.h - 7) / 2;
        draw_text_5x7(fb, lx as i32, ly as i32, label, TEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        ControlPanel::new(240, 320)
    }

    fn track_point(p: &ControlPanel, i: usize, frac: f32) -> (usize, usize) {
        let t = p.sliders[i].track;
        (t.x + (frac * (t.w - 1) as f32).round() as usize, t.y + 1)
    }

    #[test]
    fn sliders_start_at_zero() {
        assert_eq!(panel().positions(), SliderPositions { r: 0.0, g: 0.0, b: 0.0 });
    }

    #[test]
    fn dragging_sets_only_grabbed_slider() {
        let mut p = panel();
        p.handle_mouse(Some(track_point(&p, 1, 0.0)), true);
        p.handle_mouse(Some(track_point(&p, 1, 1.0)), true);
        p.handle_mouse(Some(track_point(&p, 1, 1.0)), false);
        assert_eq!(p.positions(), SliderPositions { r: 0.0, g: 200.0, b: 0.0 });
    }

    #[test]
    fn drag_past_track_end_saturates() {
        let mut p = panel();
        let (x, y) = track_point(&p, 0, 0.5);
        p.handle_mouse(Some((x, y)), true);
        let mid = p.positions().r;
        assert!((99.0..=101.0).contains(&mid), "mid = {mid}");
        p.handle_mouse(Some((0, y)), true);
        assert_eq!(p.positions().r, 0.0);
        p.handle_mouse(Some((319, y)), true);
        assert_eq!(p.positions().r, 200.0);
    }

    #[test]
    fn hovering_without_press_changes_nothing() {
        let mut p = panel();
        p.handle_mouse(Some(track_point(&p, 2, 0.5)), false);
        assert_eq!(p.positions().b, 0.0);
    }

    #[test]
    fn button_click_needs_press_and_release_inside() {
        let mut p = panel();
        let inside = (p.button.x + 5, p.button.y + 5);
        assert!(!p.handle_mouse(Some(inside), true));
        assert!(p.handle_mouse(Some(inside), false));

        // Press outside, release inside: no click
        assert!(!p.handle_mouse(Some((1, 1)), true));
        assert!(!p.handle_mouse(Some(inside), false));
    }

    #[test]
    fn draw_fills_panel_area() {
        let p = panel();
        let mut fb = FrameBuffer::new(320, 240 + PANEL_HEIGHT);
        p.draw(&mut fb);
        assert_eq!(fb.pixels[240 * 320], PANEL_BG);
        assert_eq!(fb.pixels[0], 0);
    }
}
