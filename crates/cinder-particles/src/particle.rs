//! Particle slots and the fixed-capacity pool that recycles them

use crate::curves::normalized_age;
use cinder_core::Color;
use glam::Vec3;

/// Camera distance marking a slot that was not simulated this tick
pub const INACTIVE_DISTANCE: f32 = -1.0;

/// One particle slot
///
/// A particle is live while `life > 0`. `initial_life` is the total span it
/// was spawned with and is always positive for a spawned particle.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub size: f32,
    /// Remaining life in simulated seconds
    pub life: f32,
    pub initial_life: f32,
    /// Squared distance to the camera, or `INACTIVE_DISTANCE`
    pub camera_distance: f32,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: Color::TRANSPARENT,
            size: 0.0,
            life: -1.0,
            initial_life: 0.0,
            camera_distance: INACTIVE_DISTANCE,
        }
    }

    pub fn is_live(&self) -> bool {
        self.life > 0.0
    }

    /// Normalized age in [0, 1]
    pub fn age(&self) -> f32 {
        normalized_age(self.initial_life, self.life)
    }
}

/// Fixed-size arena of particle slots with a ring-searched free cursor.
///
/// Slots never move; a dead slot is reused in place by the next spawn that
/// finds it. The live count is recomputed by the integrator every tick.
pub struct ParticlePool {
    slots: Vec<Particle>,
    last_free_hint: usize,
    live_count: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::dead(); capacity],
            last_free_hint: 0,
            live_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live particles as of the last integration step
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub(crate) fn set_live_count(&mut self, count: usize) {
        debug_assert!(count <= self.slots.len());
        self.live_count = count;
    }

    /// Find a slot with `life <= 0`, scanning from the last hit to the end and
    /// then wrapping around to it.
    ///
    /// Returns `None` when every slot is live; the caller must spawn fewer
    /// particles rather than overwrite one.
    pub fn find_free_slot(&mut self) -> Option<usize> {
        let hint = self.last_free_hint.min(self.slots.len());
        let found = (hint..self.slots.len())
            .chain(0..hint)
            .find(|&i| !self.slots[i].is_live())?;
        self.last_free_hint = found;
        Some(found)
    }

    /// Mark every slot dead and forget the live count
    pub fn reset(&mut self) {
        for p in &mut self.slots {
            p.life = -1.0;
            p.camera_distance = INACTIVE_DISTANCE;
        }
        self.last_free_hint = 0;
        self.live_count = 0;
        log::debug!("[particles] Pool reset ({} slots)", self.slots.len());
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.slots.get_mut(index)
    }

    /// All slots, live or not, in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter()
    }

    pub fn slots_mut(&mut self) -> &mut [Particle] {
        &mut self.slots
    }
}
