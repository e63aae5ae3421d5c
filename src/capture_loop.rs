// The booth's heartbeat. Each tick: sliders -> light, camera -> preview + retained frame.
// Visual: the ring light follows the sliders even while the camera is busy, and
// the preview simply holds its last picture when a read fails.

use std::fmt::Debug;

use log::{debug, info, warn};
use smart_leds::{RGB8, SmartLedsWrite};

use crate::camera::FrameSource;
use crate::light::LightController;
use crate::transcode::{to_display, to_retained};
use crate::types::{FrameBuffer, LightColor, RetainedImage, SliderPositions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was read; preview and retained image both replaced.
    Captured,
    /// The read failed; preview and retained image untouched.
    Skipped,
    /// Loop already stopped; nothing happened.
    Stopped,
}

pub struct CaptureLoop<S, W> {
    source: S,
    light: LightController<W>,
    downscale: usize,
    state: LoopState,
    // Both come from the same frame; they are only ever replaced together.
    current: Option<(FrameBuffer, RetainedImage)>,
}

impl<S, W> CaptureLoop<S, W>
where
    S: FrameSource,
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: Debug,
{
    pub fn new(source: S, light: LightController<W>, downscale: usize) -> Self {
        Self { source, light, downscale, state: LoopState::Idle, current: None }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> LoopState {
        self.state
    }

    /// The preview the window should show (None until the first good frame).
    pub fn display(&self) -> Option<&FrameBuffer> {
        self.current.as_ref().map(|(display, _)| display)
    }

    /// The full-resolution frame a snapshot would save right now.
    pub fn retained(&self) -> Option<&RetainedImage> {
        self.current.as_ref().map(|(_, retained)| retained)
    }

    #[cfg(test)]
    pub(crate) fn light(&self) -> &LightController<W> {
        &self.light
    }

    /// One tick. The light is set first so a busy camera never delays it.
    pub fn tick(&mut self, sliders: SliderPositions) -> TickOutcome {
        match self.state {
            LoopState::Stopped => return TickOutcome::Stopped,
            LoopState::Idle => self.state = LoopState::Running,
            LoopState::Running => {}
        }

        // 1) Sliders -> light, every tick regardless of what the camera does.
        let color = LightColor::from_sliders(sliders);
        self.light.apply(color);

        // 2) Camera. A failed read keeps the previous preview + retained frame.
        let Some(frame) = self.source.try_read() else {
            return TickOutcome::Skipped;
        };

        // 3) Build both images before touching state, then swap them in together.
        let display = to_display(&frame, self.downscale);
        let retained = to_retained(&frame);
        self.current = Some((display, retained));
        TickOutcome::Captured
    }

    /// Shut down: light off first, then the camera, then the preview buffers.
    /// Each step is best-effort so a failure never skips the next one.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        info!("closing...");

        if let Some(c) = self.light.last_applied() {
            debug!("light off (was {}, {}, {})", c.r, c.g, c.b);
        }
        if let Err(e) = self.light.clear() {
            warn!("could not turn light off: {e}");
        }
        self.source.release();
        self.current = None;
        self.state = LoopState::Stopped;
    }
}
