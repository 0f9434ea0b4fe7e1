//! # hand_tracker
//!
//! Turns camera frames into a stable hand position and a coarse gesture.
//!
//! ```text
//! raw frame ──mirror──▶ HandDetector ──21 landmarks──▶ palm centre ──EMA──▶ TrackedPoint
//!                                                  └──▶ fingertip/knuckle test ──▶ Gesture
//! ```
//!
//! The detector itself is a collaborator behind the [`HandDetector`] trait.
//! Two implementations ship with the crate:
//!
//! * [`PointerDetector`] — **simulation mode**: synthesizes a hand at the
//!   mouse pointer (button held = fist).
//! * `LeapDetector` — **hardware mode** (`leap` feature): reads the first hand
//!   seen by a LeapMotion controller.

pub mod landmarks;
pub mod gesture;
pub mod detector;
pub mod smoother;
mod error;

pub use detector::{DetectorOptions, HandDetector, PointerDetector, PointerInput};
#[cfg(feature = "leap")]
pub use detector::LeapDetector;
pub use error::TrackerError;
pub use gesture::Gesture;
pub use landmarks::{HandLandmarks, Landmark};
pub use smoother::{HandReading, PositionSmoother, TrackedPoint};
