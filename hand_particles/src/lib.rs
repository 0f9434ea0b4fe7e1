//! # hand_particles
//!
//! A particle swarm that follows a tracked hand, composited over a plain
//! background with a picture-in-picture of the (mirrored, annotated)
//! camera feed.
//!
//! ```text
//! FrameSource ──▶ Session::step ──────────────────────────────▶ Visualizer
//!                   │  PositionSmoother (mirror, detect, EMA)        ▲
//!                   └─ compose: background, swarm, PIP ──────────────┘
//! ```
//!
//! ## Open palm vs. fist
//!
//! | Gesture | Swarm |
//! |---|---|
//! | Open palm | spreads into a wide ring |
//! | Fist | collapses into a tight knot |
//! | no hand | particles coast and fade out |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse pointer is the hand, the
//!   left button closes it.
//! * `leap` — **Hardware mode**: a LeapMotion controller supplies the hand.
//!
//! ### Keyboard
//!
//! | Key | Effect |
//! |---|---|
//! | `Up` / `Down` | spawn rate ±1 (1–30) |
//! | `Right` / `Left` | background gray ±5 |
//! | `Z` | zoom on/off |
//! | `Space` | pause / resume |
//! | `Q` / `Escape` | quit |

pub mod app;
pub mod compositor;
pub mod config;
pub mod controls;
pub mod error;
pub mod session;
pub mod source;
pub mod visualizer;
pub mod worker;

pub use compositor::{compose, CanvasLayout, CompositorSettings};
pub use config::SessionConfig;
pub use error::HandParticlesError;
pub use session::{Session, SessionStats};
pub use source::{FrameSource, RawVideoSource, SyntheticCamera};
pub use worker::SessionWorker;
