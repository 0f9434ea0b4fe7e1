//! Top-level application wiring.
//!
//! `run` picks the frame source and the hand detector, then drives either
//! the windowed loop (visualizer on the main thread) or the headless loop
//! (frames pushed through a [`SessionWorker`]).

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use hand_tracker::{HandDetector, PointerInput};
use pixel_frame::Frame;
use tracing::{info, warn};

use crate::compositor::CanvasLayout;
use crate::config::SessionConfig;
use crate::controls::RuntimeControls;
use crate::error::HandParticlesError;
use crate::session::{Session, SessionStats};
use crate::source::{FrameSource, RawVideoSource, SyntheticCamera};
use crate::visualizer::Visualizer;
use crate::worker::SessionWorker;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Everything `run` needs, after the config file and command line merged.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub session:     SessionConfig,
    /// Raw `bgr24` input; `-` reads stdin; `None` uses the synthetic camera.
    pub input:       Option<PathBuf>,
    pub frame_limit: Option<u64>,
    pub headless:    bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Setup helpers
// ════════════════════════════════════════════════════════════════════════════

pub fn open_source(cfg: &AppConfig) -> Result<Box<dyn FrameSource>, HandParticlesError> {
    let (w, h) = (cfg.session.width, cfg.session.height);

    let source: Box<dyn FrameSource> = match cfg.input.as_deref() {
        None => {
            info!(width = w, height = h, "using synthetic camera");
            let cam = SyntheticCamera::new(w, h);
            match cfg.frame_limit {
                Some(n) => Box::new(cam.with_limit(n)),
                None    => Box::new(cam),
            }
        }
        Some(path) if path == Path::new("-") => {
            info!(width = w, height = h, "reading raw bgr24 frames from stdin");
            raw_source(io::stdin(), w, h, cfg.frame_limit)
        }
        Some(path) => {
            let file = File::open(path).map_err(|source| HandParticlesError::InputOpen {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), width = w, height = h, "reading raw bgr24 frames");
            raw_source(BufReader::new(file), w, h, cfg.frame_limit)
        }
    };
    Ok(source)
}

fn raw_source<R: io::Read + 'static>(
    reader: R,
    width:  usize,
    height: usize,
    limit:  Option<u64>,
) -> Box<dyn FrameSource> {
    let src = RawVideoSource::new(reader, width, height);
    match limit {
        Some(n) => Box::new(src.with_limit(n)),
        None    => Box::new(src),
    }
}

/// The detector for this build, plus the channel the window should feed
/// pointer events into (simulation mode only).
pub type DetectorSetup = (Box<dyn HandDetector>, Option<Sender<PointerInput>>);

#[cfg(not(feature = "leap"))]
pub fn build_detector() -> Result<DetectorSetup, HandParticlesError> {
    use hand_tracker::PointerDetector;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<PointerInput>();
    info!("hand detector: mouse pointer simulation");
    Ok((Box::new(PointerDetector::new(rx)), Some(tx)))
}

#[cfg(feature = "leap")]
pub fn build_detector() -> Result<DetectorSetup, HandParticlesError> {
    use hand_tracker::{DetectorOptions, LeapDetector};

    let leap = LeapDetector::connect(DetectorOptions::default())?;
    info!("hand detector: LeapMotion");
    Ok((Box::new(leap), None))
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

pub fn run(cfg: AppConfig) -> Result<(), HandParticlesError> {
    if cfg.headless {
        run_headless(&cfg).map(|_| ())
    } else {
        run_windowed(&cfg)
    }
}

fn run_windowed(cfg: &AppConfig) -> Result<(), HandParticlesError> {
    let mut source = open_source(cfg)?;
    let (detector, pointer_tx) = build_detector()?;
    let mut session = Session::new(detector);
    let mut controls = RuntimeControls::from_config(&cfg.session);

    let initial = CanvasLayout::new(cfg.session.width, cfg.session.height, controls.settings().zoom_factor);
    let mut vis = Visualizer::new(initial, cfg.session.fps, pointer_tx)?;
    info!(fps = cfg.session.fps, "session started");

    let mut last: Option<(Frame, CanvasLayout)> = None;

    'frames: while vis.is_open() {
        // ── 1. Controls ───────────────────────────────────────────────────
        for event in vis.poll_input() {
            if !controls.apply(event) { break 'frames; }
        }

        // ── 2. Paused: hold the last frame, read nothing ──────────────────
        if controls.paused {
            let status = status_line(&session.stats(), &controls);
            match &last {
                Some((frame, layout)) => vis.present(frame, *layout, &status, true),
                None                  => vis.idle(),
            }
            continue;
        }

        // ── 3. Next frame, or the session is over ─────────────────────────
        let Some(raw) = source.next_frame() else {
            info!("input ended");
            break;
        };

        // ── 4. Pipeline + display ─────────────────────────────────────────
        let settings = controls.settings();
        let layout = CanvasLayout::new(raw.width(), raw.height(), settings.zoom_factor);
        let out = session.step(&raw, &settings);

        let status = status_line(&session.stats(), &controls);
        vis.present(&out, layout, &status, false);
        last = Some((out, layout));
    }

    log_summary(&session.stats());
    Ok(())
}

/// Run without a window.  Returns the final counters.
pub fn run_headless(cfg: &AppConfig) -> Result<SessionStats, HandParticlesError> {
    if cfg.input.is_none() && cfg.frame_limit.is_none() {
        warn!("headless synthetic run has no frame limit; it stops only when killed");
    }

    let mut source = open_source(cfg)?;
    let settings = RuntimeControls::from_config(&cfg.session).settings();

    // Without a window nothing feeds the pointer channel; the simulated
    // detector then simply reports no hand.
    let mut worker = SessionWorker::spawn(|| {
        let (detector, _pointer) = build_detector()?;
        Ok(Session::new(detector))
    })?;
    info!("headless session started");

    let mut stats = SessionStats::default();
    while let Some(raw) = source.next_frame() {
        match worker.submit(raw, settings) {
            Some(result) => stats = result.stats,
            None         => break,
        }
    }

    log_summary(&stats);
    Ok(stats)
}

/// The line drawn in the window's top-left corner.
pub fn status_line(stats: &SessionStats, controls: &RuntimeControls) -> String {
    format!("{}  {}", stats.summary(), controls.status())
}

fn log_summary(stats: &SessionStats) {
    info!(
        frames    = stats.frames,
        with_hand = stats.frames_with_hand,
        particles = stats.particles,
        "session ended"
    );
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn small(input: Option<PathBuf>, frames: Option<u64>) -> AppConfig {
        AppConfig {
            session: SessionConfig { width: 64, height: 48, ..Default::default() },
            input,
            frame_limit: frames,
            headless: true,
        }
    }

    #[test]
    fn synthetic_source_respects_frame_limit() {
        let mut src = open_source(&small(None, Some(2))).unwrap();
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let cfg = small(Some(PathBuf::from("/nonexistent/clip.bgr")), None);
        assert!(matches!(open_source(&cfg), Err(HandParticlesError::InputOpen { .. })));
    }

    #[test]
    fn raw_file_input_is_read_frame_by_frame() {
        let path = std::env::temp_dir().join(format!("hand_particles_{}.bgr", std::process::id()));
        {
            let mut f = File::create(&path).unwrap();
            f.write_all(&vec![9u8; 64 * 48 * 3 * 3]).unwrap();
        }
        let mut src = open_source(&small(Some(path.clone()), None)).unwrap();
        let frames = std::iter::from_fn(|| src.next_frame()).count();
        std::fs::remove_file(&path).ok();
        assert_eq!(frames, 3);
    }

    #[test]
    fn status_line_reads_gesture_then_controls() {
        let stats = SessionStats {
            particles: 312,
            gesture: Some(hand_tracker::Gesture::OpenPalm),
            ..Default::default()
        };
        let mut controls = RuntimeControls::from_config(&SessionConfig::default());
        assert_eq!(status_line(&stats, &controls), "Open Palm  particles 312  spawn 15  bg 20  zoom off");

        controls.paused = true;
        assert!(status_line(&SessionStats::default(), &controls).starts_with("no hand  particles 0  spawn 15"));
        assert!(status_line(&SessionStats::default(), &controls).ends_with("[paused]"));
    }

    #[cfg(not(feature = "leap"))]
    #[test]
    fn headless_run_processes_every_frame() {
        let stats = run_headless(&small(None, Some(4))).unwrap();
        assert_eq!(stats.frames, 4);
        assert_eq!(stats.frames_with_hand, 0);
        assert_eq!(stats.particles, 0);
    }
}
