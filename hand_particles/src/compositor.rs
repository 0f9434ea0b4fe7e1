//! Output frame assembly.
//!
//! Layout (zoom off, canvas = camera frame size):
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  background (g, g, g)                                │
//! │                                                      │
//! │              ·  ·∙•∙·  ·      particle swarm         │
//! │             · ∙•●●●•∙ ·       around the hand        │
//! │              ·  ·∙•∙·  ·                             │
//! │                                   ┌────────────┐     │
//! │                                   │ camera PIP │     │
//! │                                   │  (¼ × ¼)   │     │
//! │                                   └────────────┘ 20px│
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! With zoom on, the canvas grows by `zoom_factor` and the camera's
//! coordinate space is centred inside it, so the hand position is shifted
//! by the centring offset before particles are spawned or attracted.

use hand_tracker::{HandReading, TrackedPoint};
use particle_swarm::ParticleManager;
use pixel_frame::{Bgr, Frame};

use crate::config::ZOOM_MAX;

pub const PIP_DIVISOR: usize = 4;
pub const PIP_MARGIN:  usize = 20;
pub const PIP_BORDER:  usize = 2;
const PIP_BORDER_COLOR: Bgr  = Bgr::WHITE;

// ════════════════════════════════════════════════════════════════════════════
// CompositorSettings
// ════════════════════════════════════════════════════════════════════════════

/// Per-frame knobs; a change takes effect on the next composed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorSettings {
    pub spawn_rate:      usize,
    pub background_gray: u8,
    pub zoom_factor:     Option<f32>,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        CompositorSettings { spawn_rate: 15, background_gray: 20, zoom_factor: None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CanvasLayout
// ════════════════════════════════════════════════════════════════════════════

/// Where the camera frame sits on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasLayout {
    pub frame_width:   usize,
    pub frame_height:  usize,
    pub canvas_width:  usize,
    pub canvas_height: usize,
    pub offset_x:      i32,
    pub offset_y:      i32,
}

impl CanvasLayout {
    pub fn new(frame_width: usize, frame_height: usize, zoom_factor: Option<f32>) -> Self {
        let (canvas_width, canvas_height) = match zoom_factor.map(|z| z.clamp(1.0, ZOOM_MAX)) {
            Some(z) => (
                ((frame_width  as f32 * z) as usize).max(frame_width),
                ((frame_height as f32 * z) as usize).max(frame_height),
            ),
            None => (frame_width, frame_height),
        };
        CanvasLayout {
            frame_width,
            frame_height,
            canvas_width,
            canvas_height,
            offset_x: ((canvas_width  - frame_width)  / 2) as i32,
            offset_y: ((canvas_height - frame_height) / 2) as i32,
        }
    }

    /// Move a frame-space point into canvas space.
    pub fn place(&self, p: TrackedPoint) -> TrackedPoint {
        p.translated(self.offset_x, self.offset_y)
    }

    /// Canvas pixel → normalized frame coordinates, or `None` when the pixel
    /// lies outside the camera's area.
    pub fn canvas_to_frame(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let fx = (x - self.offset_x as f32) / self.frame_width as f32;
        let fy = (y - self.offset_y as f32) / self.frame_height as f32;
        ((0.0..=1.0).contains(&fx) && (0.0..=1.0).contains(&fy)).then_some((fx, fy))
    }

    /// Top-left corner and size of the picture-in-picture.
    pub fn pip_rect(&self) -> (isize, isize, usize, usize) {
        let w = self.frame_width  / PIP_DIVISOR;
        let h = self.frame_height / PIP_DIVISOR;
        let x = self.canvas_width  as isize - w as isize - PIP_MARGIN as isize;
        let y = self.canvas_height as isize - h as isize - PIP_MARGIN as isize;
        (x, y, w, h)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// compose()
// ════════════════════════════════════════════════════════════════════════════

/// Build one output frame: background, then the swarm (spawning first when
/// a hand is tracked), then the bordered camera thumbnail.
pub fn compose(
    particles: &mut ParticleManager,
    raw:       &Frame,
    reading:   &HandReading,
    settings:  &CompositorSettings,
) -> Frame {
    let layout = CanvasLayout::new(raw.width(), raw.height(), settings.zoom_factor);
    let mut canvas = Frame::filled(
        layout.canvas_width,
        layout.canvas_height,
        Bgr::gray(settings.background_gray),
    );

    let hand = reading.point.map(|p| layout.place(p));
    if let Some(p) = hand {
        particles.spawn(p.x as f32, p.y as f32, settings.spawn_rate);
    }
    particles.update_and_draw(&mut canvas, hand, reading.gesture);

    let (x, y, w, h) = layout.pip_rect();
    let mut pip = reading.annotated.resize_nearest(w, h);
    pip.draw_border(0, 0, w, h, PIP_BORDER, PIP_BORDER_COLOR);
    canvas.blit(&pip, x, y);

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_tracker::Gesture;

    fn reading(point: Option<TrackedPoint>, gesture: Option<Gesture>, w: usize, h: usize) -> HandReading {
        HandReading { point, gesture, annotated: Frame::filled(w, h, Bgr::new(0, 0, 200)) }
    }

    #[test]
    fn plain_layout_has_no_offset() {
        let l = CanvasLayout::new(1280, 720, None);
        assert_eq!((l.canvas_width, l.canvas_height, l.offset_x, l.offset_y), (1280, 720, 0, 0));
        assert_eq!(l.pip_rect(), (1280 - 320 - 20, 720 - 180 - 20, 320, 180));
    }

    #[test]
    fn zoom_centres_the_frame() {
        let l = CanvasLayout::new(1280, 720, Some(1.5));
        assert_eq!((l.canvas_width, l.canvas_height), (1920, 1080));
        assert_eq!((l.offset_x, l.offset_y), (320, 180));
        assert_eq!(l.place(TrackedPoint::new(10, 20)), TrackedPoint::new(330, 200));
    }

    #[test]
    fn runaway_zoom_is_held_to_the_maximum() {
        let l = CanvasLayout::new(1280, 720, Some(1e5));
        assert_eq!((l.canvas_width, l.canvas_height), (1280 * 4, 720 * 4));
        assert_eq!(CanvasLayout::new(64, 48, Some(f32::INFINITY)).canvas_width, 256);
    }

    #[test]
    fn canvas_to_frame_inverts_placement() {
        let l = CanvasLayout::new(400, 200, Some(2.0));
        assert_eq!(l.canvas_to_frame(200.0 + 100.0, 100.0 + 50.0), Some((0.25, 0.25)));
        assert_eq!(l.canvas_to_frame(10.0, 10.0), None);
    }

    #[test]
    fn background_is_configured_gray() {
        let mut pm = ParticleManager::with_seed(1);
        let raw = Frame::new(200, 100);
        let settings = CompositorSettings { background_gray: 77, ..Default::default() };
        let out = compose(&mut pm, &raw, &reading(None, None, 200, 100), &settings);
        assert_eq!((out.width(), out.height()), (200, 100));
        assert_eq!(out.pixel(0, 0), Some(Bgr::gray(77)));
        assert!(pm.is_empty());
    }

    #[test]
    fn pip_sits_bottom_right_with_border() {
        let mut pm = ParticleManager::with_seed(2);
        let raw = Frame::new(400, 200);
        let out = compose(&mut pm, &raw, &reading(None, None, 400, 200), &CompositorSettings::default());

        // pip is 100 × 50 at (280, 130)
        assert_eq!(out.pixel(280, 130), Some(Bgr::WHITE));
        assert_eq!(out.pixel(281, 131), Some(Bgr::WHITE));
        assert_eq!(out.pixel(379, 179), Some(Bgr::WHITE));
        assert_eq!(out.pixel(300, 150), Some(Bgr::new(0, 0, 200)));
        // margin stays background
        assert_eq!(out.pixel(385, 185), Some(Bgr::gray(20)));
        assert_eq!(out.pixel(279, 150), Some(Bgr::gray(20)));
    }

    #[test]
    fn tracked_hand_spawns_spawn_rate_particles() {
        let mut pm = ParticleManager::with_seed(3);
        let raw = Frame::new(400, 200);
        let settings = CompositorSettings { spawn_rate: 9, ..Default::default() };
        let r = reading(Some(TrackedPoint::new(100, 100)), Some(Gesture::OpenPalm), 400, 200);
        compose(&mut pm, &raw, &r, &settings);
        assert_eq!(pm.len(), 9);
        compose(&mut pm, &raw, &r, &settings);
        assert_eq!(pm.len(), 18);
    }

    #[test]
    fn zoomed_spawn_uses_offset_point() {
        let mut pm = ParticleManager::with_seed(4);
        let raw = Frame::new(400, 200);
        let settings = CompositorSettings { spawn_rate: 1, zoom_factor: Some(2.0), ..Default::default() };
        let r = reading(Some(TrackedPoint::new(0, 0)), None, 400, 200);
        let out = compose(&mut pm, &raw, &r, &settings);

        assert_eq!((out.width(), out.height()), (800, 400));
        // spawned at (200, 100) and moved by a single physics step only
        let p = &pm.particles()[0];
        assert!((p.position[0] - 200.0).abs() < 30.0);
        assert!((p.position[1] - 100.0).abs() < 30.0);
    }

    #[test]
    fn pip_clips_on_tiny_canvas() {
        let mut pm = ParticleManager::with_seed(5);
        let raw = Frame::new(40, 20);
        let out = compose(&mut pm, &raw, &reading(None, None, 40, 20), &CompositorSettings::default());
        assert_eq!((out.width(), out.height()), (40, 20));
    }
}
