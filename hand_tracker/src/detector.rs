//! Hand landmark detectors — pointer simulation and LeapMotion hardware.
//!
//! The public interface is [`HandDetector`].  The smoother doesn't need to
//! know whether landmarks came from a model, real hardware or the mouse.

use std::sync::mpsc::{Receiver, TryRecvError};

use pixel_frame::Frame;

use crate::landmarks::{HandLandmarks, Landmark, LANDMARK_COUNT};

// ════════════════════════════════════════════════════════════════════════════
// HandDetector trait — unified interface for model, hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that finds zero or one hand in a frame.
///
/// Calls arrive in video order and `timestamp_ms` strictly increases between
/// calls, so implementations may track the hand across frames.
pub trait HandDetector {
    fn detect(&mut self, image: &Frame, timestamp_ms: u64) -> Option<HandLandmarks>;
}

impl<D: HandDetector + ?Sized> HandDetector for Box<D> {
    fn detect(&mut self, image: &Frame, timestamp_ms: u64) -> Option<HandLandmarks> {
        (**self).detect(image, timestamp_ms)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorOptions
// ════════════════════════════════════════════════════════════════════════════

/// Single-hand, video-stream configuration shared by every detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorOptions {
    pub num_hands:                     usize,
    pub min_hand_detection_confidence: f32,
    pub min_hand_presence_confidence:  f32,
    pub min_tracking_confidence:       f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        DetectorOptions {
            num_hands:                     1,
            min_hand_detection_confidence: 0.6,
            min_hand_presence_confidence:  0.6,
            min_tracking_confidence:       0.6,
        }
    }
}

impl DetectorOptions {
    /// A hand below the presence threshold counts as no hand.
    pub fn accepts(&self, hand: &HandLandmarks) -> bool {
        hand.score >= self.min_hand_presence_confidence
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PointerDetector — mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw pointer event from the display window, in normalized frame
/// coordinates of the (already mirrored) camera image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Moved { x: f32, y: f32 },
    /// Primary button down (`true`) or up (`false`).
    Button(bool),
    /// Pointer left the camera area.
    Left,
}

/// Detector driven by [`PointerInput`] events sent from the window.
///
/// The hand follows the pointer; holding the button curls all four fingers
/// so the hand reads as a fist.
pub struct PointerDetector {
    rx:      Receiver<PointerInput>,
    options: DetectorOptions,
    pointer: Option<(f32, f32)>,
    closed:  bool,
}

impl PointerDetector {
    pub fn new(rx: Receiver<PointerInput>) -> Self {
        PointerDetector {
            rx,
            options: DetectorOptions::default(),
            pointer: None,
            closed:  false,
        }
    }

    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(PointerInput::Moved { x, y }) => self.pointer = Some((x, y)),
                Ok(PointerInput::Button(down))   => self.closed = down,
                Ok(PointerInput::Left)           => self.pointer = None,
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => { self.pointer = None; break; }
            }
        }
    }
}

impl HandDetector for PointerDetector {
    fn detect(&mut self, _image: &Frame, _timestamp_ms: u64) -> Option<HandLandmarks> {
        self.drain();
        let (x, y) = self.pointer?;
        let hand = synthetic_hand(x, y, self.closed);
        self.options.accepts(&hand).then_some(hand)
    }
}

/// Build a plausible upright right hand whose palm centre is exactly
/// `(cx, cy)` in normalized coordinates.
pub fn synthetic_hand(cx: f32, cy: f32, closed: bool) -> HandLandmarks {
    const S: f32 = 0.05;

    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[0] = Landmark::new(cx, cy + 2.0 * S);

    // Thumb: CMC, MCP, IP, TIP
    let thumb_tip = if closed { (cx - 1.2 * S, cy) } else { (cx - 3.3 * S, cy - 0.5 * S) };
    points[1] = Landmark::new(cx - 1.5 * S, cy + 1.2 * S);
    points[2] = Landmark::new(cx - 2.2 * S, cy + 0.6 * S);
    points[3] = Landmark::new(cx - 2.8 * S, cy);
    points[4] = Landmark::new(thumb_tip.0, thumb_tip.1);

    // Fingers: MCP, PIP, DIP, TIP rising from a knuckle line at cy - S.
    let knuckle_y = cy - S;
    let rise: [f32; 3] = if closed { [0.8, 0.4, 0.1] } else { [1.0, 1.8, 2.5] };
    for (finger, dx) in [-1.5_f32, -0.5, 0.5, 1.5].into_iter().enumerate() {
        let base = 5 + finger * 4;
        let x = cx + dx * S;
        points[base] = Landmark::new(x, knuckle_y);
        for (j, r) in rise.iter().enumerate() {
            points[base + 1 + j] = Landmark::new(x, knuckle_y - r * S);
        }
    }

    HandLandmarks::new(points, 1.0)
}

// ════════════════════════════════════════════════════════════════════════════
// LeapDetector — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Detector backed by a LeapMotion controller.
///
/// Leap reports millimetres above the device.  The interaction box
/// (±200 mm sideways, 50–450 mm up) is projected onto the image plane, and
/// each digit's four joints fill the matching landmark slots.
#[cfg(feature = "leap")]
pub struct LeapDetector {
    connection: leaprs::Connection,
    options:    DetectorOptions,
    last:       Option<HandLandmarks>,
}

#[cfg(feature = "leap")]
impl LeapDetector {
    pub fn connect(options: DetectorOptions) -> Result<Self, crate::TrackerError> {
        use leaprs::{Connection, ConnectionConfig};

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| crate::TrackerError::DetectorUnavailable(format!("{e:?}")))?;
        connection.open()
            .map_err(|e| crate::TrackerError::DetectorUnavailable(format!("{e:?}")))?;
        tracing::info!("LeapMotion connection open");

        Ok(LeapDetector { connection, options, last: None })
    }
}

#[cfg(feature = "leap")]
impl HandDetector for LeapDetector {
    fn detect(&mut self, _image: &Frame, _timestamp_ms: u64) -> Option<HandLandmarks> {
        use leaprs::Event;

        const POLL_MS: u32 = 5;

        // No tracking event this poll: keep reporting the previous hand.
        if let Ok(msg) = self.connection.poll(POLL_MS) {
            if let Event::Tracking(frame) = msg.event() {
                self.last = frame.hands().next().and_then(|h| project_leap_hand(&h));
            }
        }
        self.last.clone().filter(|h| self.options.accepts(h))
    }
}

#[cfg(feature = "leap")]
fn project_leap_hand(hand: &leaprs::Hand) -> Option<HandLandmarks> {
    const HALF_WIDTH_MM: f32 = 200.0;
    const FLOOR_MM:      f32 = 50.0;
    const HEIGHT_MM:     f32 = 400.0;

    let project = |v: leaprs::LeapVector| Landmark {
        x: ((v.x + HALF_WIDTH_MM) / (2.0 * HALF_WIDTH_MM)).clamp(0.0, 1.0),
        y: (1.0 - (v.y - FLOOR_MM) / HEIGHT_MM).clamp(0.0, 1.0),
        z: v.z / HEIGHT_MM,
    };

    let digits: Vec<_> = hand.digits().collect();
    if digits.len() < 5 { return None; }

    let mut points = Vec::with_capacity(LANDMARK_COUNT);
    points.push(project(digits[2].metacarpal().prev_joint()));
    for d in &digits {
        points.push(project(d.proximal().prev_joint()));
        points.push(project(d.intermediate().prev_joint()));
        points.push(project(d.distal().prev_joint()));
        points.push(project(d.distal().next_joint()));
    }
    HandLandmarks::from_slice(&points, 1.0).ok()
}
