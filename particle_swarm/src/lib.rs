//! # particle_swarm
//!
//! A bounded swarm of short-lived particles that orbit a tracked hand.
//!
//! Each particle springs toward its own fixed offset around the hand rather
//! than the hand itself, so the swarm forms a cloud.  The gesture scales
//! every offset:
//!
//! | Gesture | Scale | Look |
//! |---|---|---|
//! | Open palm | 4.5 | wide ring ("explosion") |
//! | Fist | 0.2 | tight knot ("implosion"), cold colour |
//! | no hand | 1.0 | particles coast to rest |

pub mod particle;
pub mod population;

pub use particle::{scale_for, Particle};
pub use population::{ParticleManager, MAX_PARTICLES};
