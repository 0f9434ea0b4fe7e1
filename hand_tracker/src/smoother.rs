//! Position smoothing — the stage between the detector and the particles.
//!
//! [`PositionSmoother`] owns the detector.  Each call to
//! [`PositionSmoother::process`] mirrors the frame, asks the detector for a
//! hand, filters the palm centre with an exponential moving average and
//! classifies the gesture.
//!
//! Losing the hand clears the filter outright.  The next detection starts
//! from its own raw value instead of gliding in from wherever the hand was
//! last seen.

use pixel_frame::{Bgr, Frame};
use tracing::debug;

use crate::detector::HandDetector;
use crate::gesture::Gesture;
use crate::landmarks::FINGERTIPS;

/// Share of each new measurement blended into the smoothed position.
pub const SMOOTHING_ALPHA: f32 = 0.15;

/// Synthetic clock step per processed frame, in milliseconds.
pub const FRAME_STEP_MS: u64 = 33;

const RAY_COLOR:     Bgr   = Bgr::GREEN;
const RAY_THICKNESS: usize = 2;

// ════════════════════════════════════════════════════════════════════════════
// TrackedPoint / HandReading
// ════════════════════════════════════════════════════════════════════════════

/// Smoothed hand position in pixel coordinates of the mirrored frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackedPoint {
    pub x: i32,
    pub y: i32,
}

impl TrackedPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        TrackedPoint { x, y }
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        TrackedPoint::new(self.x + dx, self.y + dy)
    }
}

/// Everything the smoother learned about one frame.
#[derive(Clone, Debug)]
pub struct HandReading {
    pub point:     Option<TrackedPoint>,
    pub gesture:   Option<Gesture>,
    /// Mirrored input with fingertip rays drawn when a hand was found.
    pub annotated: Frame,
}

// ════════════════════════════════════════════════════════════════════════════
// PositionSmoother
// ════════════════════════════════════════════════════════════════════════════

pub struct PositionSmoother<D> {
    detector:      D,
    alpha:         f32,
    smoothed:      Option<(f32, f32)>,
    frame_counter: u64,
}

impl<D: HandDetector> PositionSmoother<D> {
    pub fn new(detector: D) -> Self {
        PositionSmoother {
            detector,
            alpha:         SMOOTHING_ALPHA,
            smoothed:      None,
            frame_counter: 0,
        }
    }

    /// Current filter state; `None` right after a frame without a hand.
    pub fn smoothed_position(&self) -> Option<(f32, f32)> { self.smoothed }

    /// Number of frames processed so far.
    pub fn frame_counter(&self) -> u64 { self.frame_counter }

    /// Timestamp handed to the detector on the most recent call.
    pub fn timestamp_ms(&self) -> u64 { self.frame_counter * FRAME_STEP_MS }

    pub fn detector_mut(&mut self) -> &mut D { &mut self.detector }

    /// Run one frame through mirror → detect → smooth → classify.
    pub fn process(&mut self, raw: &Frame) -> HandReading {
        let mut frame = raw.flip_horizontal();
        let (w, h) = (frame.width(), frame.height());

        self.frame_counter += 1;
        let Some(hand) = self.detector.detect(&frame, self.timestamp_ms()) else {
            if self.smoothed.take().is_some() {
                debug!(frame = self.frame_counter, "hand lost");
            }
            return HandReading { point: None, gesture: None, annotated: frame };
        };

        if self.smoothed.is_none() {
            debug!(frame = self.frame_counter, "hand acquired");
        }
        let (sx, sy) = self.observe(hand.palm_center(w, h));
        let point = TrackedPoint::new(sx as i32, sy as i32);
        let gesture = Gesture::classify(&hand);

        let origin = (point.x as isize, point.y as isize);
        for &tip in &FINGERTIPS {
            let (tx, ty) = hand.to_pixel(tip, w, h);
            frame.draw_line(origin, (tx as isize, ty as isize), RAY_COLOR, RAY_THICKNESS);
        }

        HandReading { point: Some(point), gesture: Some(gesture), annotated: frame }
    }

    /// Feed one raw palm centre through the filter and return the new
    /// smoothed value.  The first sample after a reset is taken as is.
    pub fn observe(&mut self, raw: (f32, f32)) -> (f32, f32) {
        let next = match self.smoothed {
            None => raw,
            Some((px, py)) => (
                self.alpha * raw.0 + (1.0 - self.alpha) * px,
                self.alpha * raw.1 + (1.0 - self.alpha) * py,
            ),
        };
        self.smoothed = Some(next);
        next
    }
}
