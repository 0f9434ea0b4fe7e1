//! The particle population: admission, simulation, culling and drawing.

use hand_tracker::{Gesture, TrackedPoint};
use pixel_frame::Frame;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

use crate::particle::{scale_for, Particle};

/// Hard ceiling on live particles.
pub const MAX_PARTICLES: usize = 600;

// ════════════════════════════════════════════════════════════════════════════
// ParticleManager
// ════════════════════════════════════════════════════════════════════════════

/// Owns every live particle.
///
/// Insertion order is draw order, so newer particles paint over older ones.
pub struct ParticleManager {
    particles:     Vec<Particle>,
    max_particles: usize,
    rng:           StdRng,
}

impl Default for ParticleManager {
    fn default() -> Self { ParticleManager::new() }
}

impl ParticleManager {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic manager for tests and benchmarks.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        ParticleManager {
            particles:     Vec::with_capacity(MAX_PARTICLES),
            max_particles: MAX_PARTICLES,
            rng,
        }
    }

    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    pub fn len(&self)           -> usize       { self.particles.len() }
    pub fn is_empty(&self)      -> bool        { self.particles.is_empty() }
    pub fn max_particles(&self) -> usize       { self.max_particles }
    pub fn particles(&self)     -> &[Particle] { &self.particles }

    /// Add `count` particles at `(x, y)`.
    ///
    /// Admission is `len + count <= max_particles`, checked on the whole
    /// batch: a request that does not fit adds nothing, even when the
    /// population is still below the cap.  Returns the number added.
    pub fn spawn(&mut self, x: f32, y: f32, count: usize) -> usize {
        if self.particles.len() + count > self.max_particles {
            trace!(live = self.particles.len(), requested = count, "spawn dropped at capacity");
            return 0;
        }
        self.particles.extend((0..count).map(|_| Particle::spawn(x, y, &mut self.rng)));
        count
    }

    /// Step every particle once, draw it onto `canvas`, then drop the ones
    /// whose lifetime has run out.
    ///
    /// Positions are pinned to `[0, width] × [0, height]` of the canvas.  A
    /// particle is always drawn on its final frame before it is removed.
    pub fn update_and_draw(
        &mut self,
        canvas:  &mut Frame,
        hand:    Option<TrackedPoint>,
        gesture: Option<Gesture>,
    ) {
        let scale = scale_for(gesture);
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);

        for p in &mut self.particles {
            p.update(hand, scale, gesture);
            p.clamp_to(w, h);
            canvas.fill_circle(
                p.position[0] as isize,
                p.position[1] as isize,
                p.draw_radius(),
                p.color,
            );
        }

        self.particles.retain(Particle::is_alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{FIST_COLOR, OPEN_COLOR};
    use pixel_frame::Bgr;

    fn canvas() -> Frame { Frame::filled(320, 240, Bgr::gray(20)) }

    #[test]
    fn spawn_adds_requested_count() {
        let mut pm = ParticleManager::with_seed(1);
        assert_eq!(pm.spawn(100.0, 100.0, 5), 5);
        assert_eq!(pm.len(), 5);
        assert!(pm.particles().iter().all(|p| p.position == [100.0, 100.0]));
    }

    #[test]
    fn population_never_exceeds_cap() {
        let mut pm = ParticleManager::with_seed(2);
        for _ in 0..100 {
            pm.spawn(0.0, 0.0, 7);
            assert!(pm.len() <= MAX_PARTICLES);
        }
        assert!(pm.len() > MAX_PARTICLES - 7);
    }

    #[test]
    fn spawn_at_capacity_adds_nothing() {
        let mut pm = ParticleManager::with_seed(3);
        for _ in 0..40 { pm.spawn(0.0, 0.0, 15); }
        assert_eq!(pm.len(), MAX_PARTICLES);
        assert_eq!(pm.spawn(0.0, 0.0, 1), 0);
        assert_eq!(pm.len(), MAX_PARTICLES);
    }

    #[test]
    fn oversized_request_is_dropped_whole() {
        let mut pm = ParticleManager::with_seed(4).with_max_particles(10);
        pm.spawn(0.0, 0.0, 8);
        assert_eq!(pm.spawn(0.0, 0.0, 5), 0);
        assert_eq!(pm.len(), 8);
        assert_eq!(pm.spawn(0.0, 0.0, 2), 2);
        assert_eq!(pm.len(), 10);
    }

    #[test]
    fn batch_that_does_not_fit_is_dropped_below_capacity() {
        let mut pm = ParticleManager::with_seed(11);
        for _ in 0..85 { assert_eq!(pm.spawn(0.0, 0.0, 7), 7); }
        assert_eq!(pm.len(), 595);

        assert_eq!(pm.spawn(0.0, 0.0, 7), 0);
        assert_eq!(pm.len(), 595);

        assert_eq!(pm.spawn(0.0, 0.0, 5), 5);
        assert_eq!(pm.len(), MAX_PARTICLES);
    }

    #[test]
    fn one_frame_ages_every_particle_by_one() {
        let mut pm = ParticleManager::with_seed(5);
        pm.spawn(100.0, 100.0, 5);
        let before: Vec<i32> = pm.particles().iter().map(|p| p.lifetime).collect();

        let mut c = canvas();
        pm.update_and_draw(&mut c, Some(TrackedPoint::new(100, 100)), Some(Gesture::OpenPalm));

        assert_eq!(pm.len(), 5);
        for (p, b) in pm.particles().iter().zip(before) {
            assert_eq!(p.lifetime, b - 1);
            assert!((0.0..=320.0).contains(&p.position[0]));
            assert!((0.0..=240.0).contains(&p.position[1]));
        }
    }

    #[test]
    fn particle_lives_exactly_its_lifetime() {
        let mut pm = ParticleManager::with_seed(6);
        pm.spawn(50.0, 50.0, 1);
        let lifetime = pm.particles()[0].lifetime;

        let mut c = canvas();
        for _ in 0..lifetime - 1 {
            pm.update_and_draw(&mut c, None, None);
            assert_eq!(pm.len(), 1);
        }
        pm.update_and_draw(&mut c, None, None);
        assert!(pm.is_empty());
    }

    #[test]
    fn positions_stay_on_canvas_under_huge_velocity() {
        let mut pm = ParticleManager::with_seed(7);
        pm.spawn(10.0, 10.0, 20);
        for p in pm.particles.iter_mut() { p.velocity = [1.0e6, -1.0e6]; }

        let mut c = canvas();
        pm.update_and_draw(&mut c, None, None);
        for p in pm.particles() {
            assert_eq!(p.position, [320.0, 0.0]);
        }
    }

    #[test]
    fn hand_far_away_still_clamped() {
        let mut pm = ParticleManager::with_seed(8);
        pm.spawn(160.0, 120.0, 30);
        let mut c = canvas();
        for _ in 0..50 {
            pm.update_and_draw(&mut c, Some(TrackedPoint::new(10_000, -10_000)), Some(Gesture::OpenPalm));
        }
        for p in pm.particles() {
            assert!((0.0..=320.0).contains(&p.position[0]));
            assert!((0.0..=240.0).contains(&p.position[1]));
        }
    }

    #[test]
    fn particles_are_drawn_in_their_color() {
        let mut pm = ParticleManager::with_seed(9);
        pm.spawn(160.0, 120.0, 1);
        pm.particles[0].velocity = [0.0, 0.0];

        let mut c = canvas();
        pm.update_and_draw(&mut c, None, None);
        assert_eq!(c.pixel(160, 120), Some(OPEN_COLOR));

        let mut c = canvas();
        let hand = Some(TrackedPoint::new(160, 120));
        pm.update_and_draw(&mut c, hand, Some(Gesture::Fist));
        let p = &pm.particles()[0];
        assert_eq!(c.pixel(p.position[0] as usize, p.position[1] as usize), Some(FIST_COLOR));
    }

    #[test]
    fn scale_is_shared_by_all_particles() {
        // Identical particles must land in identical places regardless of
        // their order in the population.
        let mut pm = ParticleManager::with_seed(10);
        pm.spawn(0.0, 0.0, 3);
        let template = pm.particles[0].clone();
        for p in pm.particles.iter_mut() { *p = template.clone(); }

        let mut c = canvas();
        pm.update_and_draw(&mut c, Some(TrackedPoint::new(160, 120)), Some(Gesture::Fist));
        let first = pm.particles()[0].position;
        assert!(pm.particles().iter().all(|p| p.position == first));

        let mut solo = template;
        solo.update(Some(TrackedPoint::new(160, 120)), 0.2, Some(Gesture::Fist));
        solo.clamp_to(320.0, 240.0);
        assert_eq!(solo.position, first);
    }
}
