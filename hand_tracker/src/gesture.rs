//! Open-palm / fist classification.

use std::fmt;

use crate::landmarks::{HandLandmarks, CURL_PAIRS};

/// Coarse hand pose.  Absence of a hand is `Option::<Gesture>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    OpenPalm,
    Fist,
}

impl Gesture {
    /// Classify a hand from fingertip/knuckle geometry.
    ///
    /// A finger is curled when its tip sits lower in the image (larger `y`)
    /// than its middle knuckle.  All four fingers curled is a fist; anything
    /// else is an open palm.
    pub fn classify(hand: &HandLandmarks) -> Gesture {
        let curled = CURL_PAIRS.iter()
            .all(|&(tip, knuckle)| hand.points[tip].y > hand.points[knuckle].y);
        if curled { Gesture::Fist } else { Gesture::OpenPalm }
    }

    pub fn name(self) -> &'static str {
        match self {
            Gesture::OpenPalm => "Open Palm",
            Gesture::Fist     => "Fist",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
