// What you SEE:
// • The live camera preview (half size) at the top of the window.
// • Three sliders (R, G, B, 0..200) that set the ring light color live.
// • "SNAPSHOT!" (or Space) saves the current frame as YYYY-MM-DD_HH-MM-SS.jpg.
// • Closing the window, ESC or Ctrl+C turns the light off and exits.

mod camera;
mod capture_loop;
mod config;
mod draw;
mod error;
mod light;
mod panel;
mod snapshot;
mod timer;
mod transcode;
mod types;

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use smart_leds::{RGB8, SmartLedsWrite};

use camera::{CameraCapture, FrameSource};
use capture_loop::CaptureLoop;
use config::{BoothConfig, WINDOW_TITLE};
use draw::{Drawer, blit, draw_text_5x7, text_width_5x7};
use error::Result;
use light::LightController;
use panel::{ControlPanel, PANEL_HEIGHT, PANEL_MIN_WIDTH};
use snapshot::SnapshotWriter;
use timer::TickTimer;
use types::FrameBuffer;

/// Cleared by the Ctrl+C handler.
static RUNNING: AtomicBool = AtomicBool::new(true);

const BACKGROUND: u32 = 0x00_10_10_10;

#[derive(Parser)]
#[command(
    name = "photobooth",
    version,
    about = "Live camera preview with ring-light control and JPEG snapshots"
)]
struct Args {
    /// Path to output directory to store snapshots (default: current folder)
    #[arg(short, long, default_value = "./")]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = Args::parse();
    let cfg = BoothConfig::new(args.output);

    if let Err(e) = ctrlc::set_handler(|| RUNNING.store(false, Ordering::SeqCst)) {
        warn!("Ctrl+C handler not installed: {e}");
    }

    if !cfg.output_dir.is_dir() {
        warn!("output directory {} does not exist; snapshots will fail", cfg.output_dir.display());
    }

    info!("starting...");
    if let Err(e) = run(&cfg) {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Startup order: camera, then light, then window. Each later failure still
/// runs the shutdown path so the light never stays on.
fn run(cfg: &BoothConfig) -> Result<()> {
    /* --- Camera ---
       Fatal if missing: the booth is useless without it. */
    let (cw, ch) = cfg.capture_size;
    let cam = CameraCapture::new(cfg.camera_index, cw, ch, config::CAPTURE_FPS)?;
    let (w, h) = cam.resolution();

    /* --- Light ---
       Visual: the ring light comes on at the warm-up color. */
    let light = LightController::new(open_strip()?, cfg.strip_len, cfg.warmup_color)?;
    let mut booth = CaptureLoop::new(cam, light, cfg.downscale);

    /* --- Window ---
       Preview on top (same size as the display bitmap), panel below. */
    let preview_w = (w as usize / cfg.downscale.max(1)).max(1);
    let preview_h = (h as usize / cfg.downscale.max(1)).max(1);
    let win_w = preview_w.max(PANEL_MIN_WIDTH);
    let win_h = preview_h + PANEL_HEIGHT;

    let mut drawer = match Drawer::new(WINDOW_TITLE, win_w, win_h) {
        Ok(d) => d,
        Err(e) => {
            booth.stop();
            return Err(e);
        }
    };
    let mut panel = ControlPanel::new(preview_h, win_w);
    let writer = SnapshotWriter::new(&cfg.output_dir, cfg.jpeg_quality);
    info!("snapshots go to {}", writer.output_dir().display());
    let mut screen = FrameBuffer::new(win_w, win_h);

    let result = event_loop(&mut booth, &mut drawer, &mut panel, &writer, &mut screen, cfg);

    // Light off, camera released, and only then the window goes away.
    booth.stop();
    drop(drawer);
    result
}

/* ------------------------------ Main loop ------------------------------ */
fn event_loop<S, W>(
    booth: &mut CaptureLoop<S, W>,
    drawer: &mut Drawer,
    panel: &mut ControlPanel,
    writer: &SnapshotWriter,
    screen: &mut FrameBuffer,
    cfg: &BoothConfig,
) -> Result<()>
where
    S: FrameSource,
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: Debug,
{
    let mut timer = TickTimer::new(cfg.tick_interval);

    while drawer.is_open() && !drawer.esc_pressed() && RUNNING.load(Ordering::SeqCst) {
        /* 1) Tick when the timer says so; it re-arms itself. */
        if timer.poll(Instant::now()) {
            booth.tick(panel.positions());
        }

        /* 2) Inputs: slider drags, snapshot click or Space. */
        let clicked = panel.handle_mouse(drawer.mouse_pos(), drawer.left_mouse_down());
        if clicked || drawer.space_pressed_once() {
            if let Err(e) = writer.save(booth.retained()) {
                error!("snapshot failed: {e}");
            }
        }

        /* 3) Compose: preview centered on top, panel below. */
        screen.pixels.fill(BACKGROUND);
        match booth.display() {
            Some(preview) => {
                let x = screen.width.saturating_sub(preview.width) / 2;
                blit(screen, preview, x, 0);
            }
            None => {
                let hint = "WAITING FOR CAMERA";
                let x = screen.width.saturating_sub(text_width_5x7(hint)) / 2;
                draw_text_5x7(screen, x as i32, 20, hint, 0x00_FF_FF_FF);
            }
        }
        panel.draw(screen);

        /* 4) Present (this also pumps window events). */
        drawer.present(screen)?;
    }

    Ok(())
}

#[cfg(feature = "hardware")]
fn open_strip() -> Result<light::hardware::SpiStrip> {
    light::hardware::open()
}

#[cfg(not(feature = "hardware"))]
fn open_strip() -> Result<light::DryRunStrip> {
    info!("built without the `hardware` feature; light output is logged only");
    Ok(light::DryRunStrip::default())
}
