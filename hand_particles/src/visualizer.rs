//! Software-rendered display window using `minifb`.
//!
//! The window shows the composed canvas stretched to the window size, with
//! a status line in the top-left corner and the key legend along the bottom:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ Open Palm  particles 312  spawn 15  bg 20  zoom off    │
//! │                                                        │
//! │                   (composed canvas)                    │
//! │                                                        │
//! │                                         ┌──────────┐   │
//! │                                         │   PIP    │   │
//! │ UP/DOWN=spawn  LEFT/RIGHT=bg ...        └──────────┘   │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! In simulation mode the mouse stands in for the hand: its position is
//! mapped back through the [`CanvasLayout`] into normalized camera
//! coordinates and sent to the `PointerDetector`.

use std::sync::mpsc::Sender;
use std::time::Duration;

use hand_tracker::PointerInput;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use pixel_frame::Frame;

use crate::compositor::CanvasLayout;
use crate::controls::ControlEvent;
use crate::error::HandParticlesError;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const TITLE:          &str  = "Hand Particles";
const TEXT_SCALE:     usize = 2;
const TEXT_MARGIN:    usize = 12;
const STATUS_COLOR:   u32   = 0xFFEEEEEE;
const LEGEND_COLOR:   u32   = 0xFF888888;
const PAUSE_DIM:      f32   = 0.5;
const LEGEND: &str =
    "UP/DOWN=spawn  LEFT/RIGHT=bg  Z=zoom  SPACE=pause  Q=quit";

/// Key → control, and whether holding the key repeats it.
const BINDINGS: &[(Key, KeyRepeat, ControlEvent)] = &[
    (Key::Up,     KeyRepeat::Yes, ControlEvent::SpawnRateUp),
    (Key::Down,   KeyRepeat::Yes, ControlEvent::SpawnRateDown),
    (Key::Right,  KeyRepeat::Yes, ControlEvent::BackgroundUp),
    (Key::Left,   KeyRepeat::Yes, ControlEvent::BackgroundDown),
    (Key::Z,      KeyRepeat::No,  ControlEvent::ToggleZoom),
    (Key::Space,  KeyRepeat::No,  ControlEvent::TogglePause),
    (Key::Q,      KeyRepeat::No,  ControlEvent::Quit),
    (Key::Escape, KeyRepeat::No,  ControlEvent::Quit),
];

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:     Window,
    buf:        Vec<u32>,
    pointer_tx: Option<Sender<PointerInput>>,

    layout:     Option<CanvasLayout>,
    pointer:    PointerTracker,
}

impl Visualizer {
    /// Open a window sized for `layout`.  `pointer_tx` is `None` when a real
    /// detector is in use and the mouse should be ignored.
    pub fn new(
        layout:     CanvasLayout,
        fps:        u32,
        pointer_tx: Option<Sender<PointerInput>>,
    ) -> Result<Self, HandParticlesError> {
        let mut window = Window::new(
            TITLE,
            layout.canvas_width,
            layout.canvas_height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        ).map_err(|e| HandParticlesError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_micros(1_000_000 / fps.max(1) as u64)));

        Ok(Visualizer {
            window,
            buf: Vec::with_capacity(layout.canvas_width * layout.canvas_height),
            pointer_tx,
            layout: Some(layout),
            pointer: PointerTracker::default(),
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse.  Key presses come back as control events;
    /// the mouse goes straight to the pointer detector.
    pub fn poll_input(&mut self) -> Vec<ControlEvent> {
        if !self.window.is_open() {
            return vec![ControlEvent::Quit];
        }

        let events: Vec<ControlEvent> = BINDINGS
            .iter()
            .filter(|(key, repeat, _)| self.window.is_key_pressed(*key, *repeat))
            .map(|(_, _, event)| *event)
            .collect();

        self.forward_pointer();
        events
    }

    fn forward_pointer(&mut self) {
        let (Some(tx), Some(layout)) = (self.pointer_tx.as_ref(), self.layout) else { return };

        let mouse = self.window.get_mouse_pos(MouseMode::Discard);
        let down = self.window.get_mouse_down(MouseButton::Left);
        self.pointer.forward(tx, &layout, self.window.get_size(), mouse, down);
    }

    /// Keep the window responsive when there is nothing to draw.
    pub fn idle(&mut self) {
        self.window.update();
    }

    /// Show one composed frame.  `paused` dims it.
    pub fn present(&mut self, canvas: &Frame, layout: CanvasLayout, status: &str, paused: bool) {
        self.layout = Some(layout);
        let (w, h) = (canvas.width(), canvas.height());

        if paused {
            canvas.dimmed(PAUSE_DIM).write_argb(&mut self.buf);
        } else {
            canvas.write_argb(&mut self.buf);
        }

        draw_label(&mut self.buf, w, h, status, TEXT_MARGIN, TEXT_MARGIN, STATUS_COLOR);
        let legend_y = h.saturating_sub(TEXT_MARGIN + 5 * TEXT_SCALE);
        draw_label(&mut self.buf, w, h, LEGEND, TEXT_MARGIN, legend_y, LEGEND_COLOR);

        self.window.update_with_buffer(&self.buf, w, h).ok();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pointer
// ────────────────────────────────────────────────────────────────────────────

/// Turns raw mouse readings into [`PointerInput`] events, forwarding only
/// changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerTracker {
    inside:     bool,
    mouse_down: bool,
}

impl PointerTracker {
    /// `mouse` is in window pixels.  The window may be any size: the
    /// position is first scaled onto the canvas, then mapped through
    /// `layout` into normalized frame coordinates.  A pointer over the zoom
    /// margin counts as outside the frame.
    pub fn forward(
        &mut self,
        tx:     &Sender<PointerInput>,
        layout: &CanvasLayout,
        window: (usize, usize),
        mouse:  Option<(f32, f32)>,
        down:   bool,
    ) {
        let (win_w, win_h) = window;
        let pos = mouse.and_then(|(mx, my)| {
            let cx = mx * layout.canvas_width  as f32 / win_w.max(1) as f32;
            let cy = my * layout.canvas_height as f32 / win_h.max(1) as f32;
            layout.canvas_to_frame(cx, cy)
        });

        match pos {
            Some((x, y)) => {
                let _ = tx.send(PointerInput::Moved { x, y });
                self.inside = true;
            }
            None if self.inside => {
                let _ = tx.send(PointerInput::Left);
                self.inside = false;
            }
            None => {}
        }

        if down != self.mouse_down {
            let _ = tx.send(PointerInput::Button(down));
            self.mouse_down = down;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text
// ────────────────────────────────────────────────────────────────────────────

/// Draw `text` with the 3×5 bitmap font, each font pixel `TEXT_SCALE`
/// screen pixels wide.  Clipped to the buffer.
fn draw_label(buf: &mut [u32], width: usize, height: usize, text: &str, x: usize, y: usize, color: u32) {
    let advance = 4 * TEXT_SCALE;
    let mut cx = x;
    for ch in text.chars() {
        if cx + advance > width { break; }
        for (row, &bits) in char_glyph(ch).iter().enumerate() {
            for col in 0..3usize {
                if bits & (1 << (2 - col)) == 0 { continue; }
                for sy in 0..TEXT_SCALE {
                    for sx in 0..TEXT_SCALE {
                        let px = cx + col * TEXT_SCALE + sx;
                        let py = y + row * TEXT_SCALE + sy;
                        if px < width && py < height {
                            buf[py * width + px] = color;
                        }
                    }
                }
            }
        }
        cx += advance;
    }
}

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '[' => [0b110, 0b100, 0b100, 0b100, 0b110],
        ']' => [0b011, 0b001, 0b001, 0b001, 0b011],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{self, Receiver};

    fn drain(rx: &Receiver<PointerInput>) -> Vec<PointerInput> {
        rx.try_iter().collect()
    }

    fn moved(x: f32, y: f32) -> PointerInput {
        PointerInput::Moved { x, y }
    }

    #[test]
    fn pointer_maps_straight_through_without_zoom() {
        let (tx, rx) = mpsc::channel();
        let layout = CanvasLayout::new(400, 200, None);
        let mut t = PointerTracker::default();

        t.forward(&tx, &layout, (400, 200), Some((100.0, 50.0)), false);
        assert_eq!(drain(&rx), vec![moved(0.25, 0.25)]);
    }

    #[test]
    fn pointer_scales_a_resized_window_onto_the_canvas() {
        let (tx, rx) = mpsc::channel();
        let layout = CanvasLayout::new(400, 200, None);
        let mut t = PointerTracker::default();

        t.forward(&tx, &layout, (800, 400), Some((200.0, 100.0)), false);
        assert_eq!(drain(&rx), vec![moved(0.25, 0.25)]);

        let zoomed = CanvasLayout::new(400, 200, Some(2.0));
        t.forward(&tx, &zoomed, (1600, 800), Some((600.0, 300.0)), false);
        assert_eq!(drain(&rx), vec![moved(0.25, 0.25)]);
    }

    #[test]
    fn zoom_margin_reports_left_once() {
        let (tx, rx) = mpsc::channel();
        // canvas 800×400, frame placed at (200, 100)
        let layout = CanvasLayout::new(400, 200, Some(2.0));
        let mut t = PointerTracker::default();

        t.forward(&tx, &layout, (800, 400), Some((300.0, 150.0)), false);
        assert_eq!(drain(&rx), vec![moved(0.25, 0.25)]);

        t.forward(&tx, &layout, (800, 400), Some((50.0, 50.0)), false);
        assert_eq!(drain(&rx), vec![PointerInput::Left]);

        t.forward(&tx, &layout, (800, 400), Some((50.0, 50.0)), false);
        t.forward(&tx, &layout, (800, 400), None, false);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn pointer_outside_from_the_start_sends_nothing() {
        let (tx, rx) = mpsc::channel();
        let layout = CanvasLayout::new(400, 200, Some(2.0));
        let mut t = PointerTracker::default();

        t.forward(&tx, &layout, (800, 400), Some((10.0, 10.0)), false);
        t.forward(&tx, &layout, (800, 400), None, false);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn button_edges_are_sent_once() {
        let (tx, rx) = mpsc::channel();
        let layout = CanvasLayout::new(400, 200, None);
        let mut t = PointerTracker::default();

        t.forward(&tx, &layout, (400, 200), None, true);
        assert_eq!(drain(&rx), vec![PointerInput::Button(true)]);

        t.forward(&tx, &layout, (400, 200), None, true);
        assert!(drain(&rx).is_empty());

        t.forward(&tx, &layout, (400, 200), None, false);
        assert_eq!(drain(&rx), vec![PointerInput::Button(false)]);
    }

    #[test]
    fn every_control_has_a_key() {
        for event in [
            ControlEvent::SpawnRateUp,
            ControlEvent::SpawnRateDown,
            ControlEvent::BackgroundUp,
            ControlEvent::BackgroundDown,
            ControlEvent::ToggleZoom,
            ControlEvent::TogglePause,
            ControlEvent::Quit,
        ] {
            assert!(BINDINGS.iter().any(|(_, _, e)| *e == event), "{event:?} unbound");
        }
    }

    #[test]
    fn label_draws_and_clips() {
        let (w, h) = (40, 20);
        let mut buf = vec![0u32; w * h];
        draw_label(&mut buf, w, h, "1", 0, 0, 7);
        // '1' top row is 0b010: middle column, scaled by 2
        assert_eq!(buf[2], 7);
        assert_eq!(buf[0], 0);
        // text running off the right edge is cut, not wrapped
        draw_label(&mut buf, w, h, "88888888", 30, 15, 9);
        assert!(buf.iter().filter(|&&p| p == 9).count() > 0);
    }

    #[test]
    fn lowercase_uses_uppercase_glyphs() {
        assert_eq!(char_glyph('q'), char_glyph('Q'));
        assert_ne!(char_glyph('q'), char_glyph('?'));
    }
}
