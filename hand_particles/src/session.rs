//! One tracking session: smoother + swarm, advanced one frame at a time.
//!
//! `Session` owns all state that survives between frames.  [`Session::step`]
//! takes `&mut self`, so one session can never run two frames at once.

use hand_tracker::{Gesture, HandDetector, PositionSmoother};
use particle_swarm::ParticleManager;
use pixel_frame::Frame;
use tracing::debug;

use crate::compositor::{compose, CompositorSettings};

/// How often (in frames) the session logs its statistics.
const STATS_EVERY: u64 = 150;

/// Running counters for status display and logging.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionStats {
    pub frames:          u64,
    pub frames_with_hand: u64,
    pub particles:       usize,
    pub gesture:         Option<Gesture>,
}

impl SessionStats {
    pub fn summary(&self) -> String {
        let gesture = self.gesture.map_or("no hand", Gesture::name);
        format!("{}  particles {}", gesture, self.particles)
    }
}

pub struct Session<D> {
    smoother:  PositionSmoother<D>,
    particles: ParticleManager,
    stats:     SessionStats,
}

impl<D: HandDetector> Session<D> {
    pub fn new(detector: D) -> Self {
        Self::with_particles(detector, ParticleManager::new())
    }

    pub fn with_particles(detector: D, particles: ParticleManager) -> Self {
        Session {
            smoother: PositionSmoother::new(detector),
            particles,
            stats:    SessionStats::default(),
        }
    }

    pub fn stats(&self)     -> SessionStats        { self.stats }
    pub fn particles(&self) -> &ParticleManager    { &self.particles }
    pub fn smoother(&self)  -> &PositionSmoother<D> { &self.smoother }

    /// Run the whole per-frame pipeline on one camera frame.
    pub fn step(&mut self, raw: &Frame, settings: &CompositorSettings) -> Frame {
        let reading = self.smoother.process(raw);
        let out = compose(&mut self.particles, raw, &reading, settings);

        self.stats.frames += 1;
        if reading.point.is_some() {
            self.stats.frames_with_hand += 1;
        }
        self.stats.gesture = reading.gesture;
        self.stats.particles = self.particles.len();

        if self.stats.frames % STATS_EVERY == 0 {
            debug!(
                frames    = self.stats.frames,
                with_hand = self.stats.frames_with_hand,
                particles = self.stats.particles,
                "session stats"
            );
        }
        out
    }
}
