//! The 21-point hand landmark layout.
//!
//! Coordinates are normalized to the image: `x` grows to the right and `y`
//! grows downward, both in 0.0–1.0.  `z` is relative depth and unused here.

use crate::error::TrackerError;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Heel of the palm plus the index and pinky knuckles.  Their mean moves
/// with the hand but not with the fingers.
pub const PALM_ANCHORS: [usize; 3] = [WRIST, INDEX_MCP, PINKY_MCP];

/// All five fingertips, thumb first.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// (tip, knuckle) pairs for the four fingers.  The thumb folds sideways and
/// is left out.
pub const CURL_PAIRS: [(usize, usize); 4] = [
    (INDEX_TIP,  INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP,   RING_PIP),
    (PINKY_TIP,  PINKY_PIP),
];

// ════════════════════════════════════════════════════════════════════════════
// Data structures
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }
}

/// One detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub points: [Landmark; LANDMARK_COUNT],
    /// Detector presence confidence, 0.0–1.0.
    pub score:  f32,
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT], score: f32) -> Self {
        HandLandmarks { points, score }
    }

    /// Build from a detector's variable-length output.
    pub fn from_slice(points: &[Landmark], score: f32) -> Result<Self, TrackerError> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into()
            .map_err(|_| TrackerError::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual:   points.len(),
            })?;
        Ok(HandLandmarks { points, score })
    }

    /// Landmark `idx` in pixel space of a `width × height` image.
    pub fn to_pixel(&self, idx: usize, width: usize, height: usize) -> (f32, f32) {
        let p = self.points[idx];
        (p.x * width as f32, p.y * height as f32)
    }

    /// Mean of the [`PALM_ANCHORS`] in pixel space.
    pub fn palm_center(&self, width: usize, height: usize) -> (f32, f32) {
        let (sx, sy) = PALM_ANCHORS.iter()
            .map(|&i| self.to_pixel(i, width, height))
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        let n = PALM_ANCHORS.len() as f32;
        (sx / n, sy / n)
    }
}
