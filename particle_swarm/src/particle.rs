//! A single particle and its per-frame physics step.

use std::f32::consts::PI;
use std::ops::Range;

use hand_tracker::{Gesture, TrackedPoint};
use pixel_frame::Bgr;
use rand::Rng;

// ════════════════════════════════════════════════════════════════════════════
// Tuning
// ════════════════════════════════════════════════════════════════════════════

/// Radius of the disk target offsets are drawn from, in pixels.
pub const TARGET_RADIUS:      f32        = 60.0;
pub const LIFETIME_FRAMES:    Range<i32> = 80..120;
/// Lifetime that maps to full brightness/size.
pub const FULL_LIFETIME:      f32        = 120.0;
pub const SPAWN_VELOCITY_STD: f32        = 0.5;
pub const ATTRACTION:         f32        = 0.05;
pub const TRACKING_DAMPING:   f32        = 0.92;
pub const DRIFT_DAMPING:      f32        = 0.95;
pub const BASE_RADIUS:        f32        = 5.0;

pub const OPEN_SCALE:    f32 = 4.5;
pub const FIST_SCALE:    f32 = 0.2;
pub const NEUTRAL_SCALE: f32 = 1.0;

/// Colour while the hand is open (and at spawn).
pub const OPEN_COLOR: Bgr = Bgr::new(255, 150, 150);
/// Colour while the hand is a fist.
pub const FIST_COLOR: Bgr = Bgr::new(100, 100, 255);

/// Offset scale for a gesture; applies to every particle in a frame.
pub fn scale_for(gesture: Option<Gesture>) -> f32 {
    match gesture {
        Some(Gesture::OpenPalm) => OPEN_SCALE,
        Some(Gesture::Fist)     => FIST_SCALE,
        None                    => NEUTRAL_SCALE,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position:      [f32; 2],
    pub velocity:      [f32; 2],
    /// Where this particle wants to sit relative to the hand, before scaling.
    pub target_offset: [f32; 2],
    pub color:         Bgr,
    /// Frames left; the particle is culled once this reaches zero.
    pub lifetime:      i32,
    pub base_radius:   f32,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(x: f32, y: f32, rng: &mut R) -> Self {
        // sqrt keeps the offsets area-uniform instead of bunched at the centre
        let r = TARGET_RADIUS * rng.gen::<f32>().sqrt();
        let theta = rng.gen::<f32>() * 2.0 * PI;

        Particle {
            position:      [x, y],
            velocity:      [gaussian(rng, SPAWN_VELOCITY_STD), gaussian(rng, SPAWN_VELOCITY_STD)],
            target_offset: [r * theta.cos(), r * theta.sin()],
            color:         OPEN_COLOR,
            lifetime:      rng.gen_range(LIFETIME_FRAMES),
            base_radius:   BASE_RADIUS,
        }
    }

    /// Advance one frame.
    ///
    /// With a hand, the velocity springs toward `hand + offset * scale` and
    /// is damped.  Without one, the particle only coasts and slows down.
    pub fn update(&mut self, hand: Option<TrackedPoint>, scale: f32, gesture: Option<Gesture>) {
        match hand {
            Some(p) => {
                let target = [
                    p.x as f32 + self.target_offset[0] * scale,
                    p.y as f32 + self.target_offset[1] * scale,
                ];
                for axis in 0..2 {
                    self.velocity[axis] += (target[axis] - self.position[axis]) * ATTRACTION;
                    self.velocity[axis] *= TRACKING_DAMPING;
                }
                self.color = if gesture == Some(Gesture::Fist) { FIST_COLOR } else { OPEN_COLOR };
            }
            None => {
                self.velocity[0] *= DRIFT_DAMPING;
                self.velocity[1] *= DRIFT_DAMPING;
            }
        }

        self.position[0] += self.velocity[0];
        self.position[1] += self.velocity[1];
        self.lifetime -= 1;
    }

    pub fn is_alive(&self) -> bool { self.lifetime > 0 }

    /// Remaining life as a 0.0–1.0 fade factor.
    pub fn fade(&self) -> f32 {
        (self.lifetime as f32 / FULL_LIFETIME).max(0.0)
    }

    /// Draw radius in pixels; never below one so the last frame is visible.
    pub fn draw_radius(&self) -> usize {
        ((self.base_radius * self.fade()) as usize).max(1)
    }

    /// Pin the position inside `[0, width] × [0, height]`.
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        self.position[0] = self.position[0].clamp(0.0, width);
        self.position[1] = self.position[1].clamp(0.0, height);
    }
}

/// Zero-mean normal sample (Box–Muller).
fn gaussian<R: Rng + ?Sized>(rng: &mut R, std_dev: f32) -> f32 {
    let u1 = 1.0 - rng.gen::<f32>(); // (0, 1] keeps ln finite
    let u2 = rng.gen::<f32>();
    std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
