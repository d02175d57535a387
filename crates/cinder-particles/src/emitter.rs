//! Spawn policy: how many particles to emit each tick and their initial state

use crate::particle::{ParticlePool, INACTIVE_DISTANCE};
use crate::preset::PresetConfig;
use crate::rand::RandomSource;
use glam::Vec3;

/// Wall-clock length of one nominal frame, in seconds
pub const NOMINAL_FRAME: f64 = 0.016;

/// Outcome of one emission pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Particles the spawn rate asked for this tick, after the burst cap
    pub requested: usize,
    /// Particles actually placed in the pool
    pub spawned: usize,
    /// True if the pool ran out of free slots before `requested` was met
    pub exhausted: bool,
}

/// The single point emitter
///
/// Fractional particles carry over between ticks in `accumulator`, so rates
/// below one particle per frame still emit.
#[derive(Debug, Clone)]
pub struct Emitter {
    /// World-space spawn position
    pub origin: Vec3,
    /// Frame length used to compute the per-tick burst ceiling
    pub nominal_frame: f64,
    accumulator: f64,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(Vec3::ZERO, NOMINAL_FRAME)
    }
}

impl Emitter {
    pub fn new(origin: Vec3, nominal_frame: f64) -> Self {
        Self {
            origin,
            nominal_frame,
            accumulator: 0.0,
        }
    }

    /// Drop any carried fractional particle
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Number of particles to emit for a frame of `dt` wall seconds.
    ///
    /// The count is capped at what one nominal frame would produce, so a long
    /// stall does not dump a backlog of particles in a single tick. Backlog
    /// above the cap is discarded.
    pub fn spawn_count(&mut self, spawn_rate: f32, dt: f64) -> usize {
        let rate = spawn_rate as f64;
        if !(rate > 0.0) || !(dt > 0.0) || !dt.is_finite() || !rate.is_finite() {
            return 0;
        }

        self.accumulator += dt * rate;
        let whole = self.accumulator.floor();
        let ceiling = burst_ceiling(spawn_rate, self.nominal_frame) as f64;

        self.accumulator -= whole;
        whole.min(ceiling) as usize
    }

    /// Spawn this tick's particles into free pool slots.
    ///
    /// `stretch` scales the sampled life from preset seconds to simulated
    /// seconds. Stops early, without overwriting live particles, when the
    /// pool has no free slot left.
    pub fn emit(
        &mut self,
        pool: &mut ParticlePool,
        preset: &PresetConfig,
        rng: &mut RandomSource,
        dt: f64,
        stretch: f32,
    ) -> SpawnReport {
        let requested = self.spawn_count(preset.spawn_rate, dt);
        let mut report = SpawnReport {
            requested,
            ..Default::default()
        };

        for _ in 0..requested {
            let Some(index) = pool.find_free_slot() else {
                report.exhausted = true;
                break;
            };

            let azimuth = rng.angle();
            let polar = rng.range(0.0, preset.spread);
            let speed = rng.range(preset.min_speed, preset.max_speed);
            let life = rng.range(preset.min_life, preset.max_life) * stretch;

            // A zero-length life would be dead on arrival
            if !(life > 0.0) {
                continue;
            }

            let Some(p) = pool.get_mut(index) else {
                break;
            };
            p.position = self.origin;
            p.velocity = spherical_velocity(azimuth, polar, speed);
            p.life = life;
            p.initial_life = life;
            p.size = preset.initial_size;
            p.color = preset.initial_color;
            p.camera_distance = INACTIVE_DISTANCE;
            report.spawned += 1;
        }

        if report.exhausted {
            log::debug!(
                "[particles] Pool exhausted: spawned {} of {} requested",
                report.spawned,
                report.requested
            );
        }

        report
    }
}

/// Most particles one tick may spawn at `spawn_rate`: one nominal frame's
/// worth, and at least one for any positive rate
pub fn burst_ceiling(spawn_rate: f32, nominal_frame: f64) -> usize {
    if !(spawn_rate > 0.0) {
        return 0;
    }
    ((nominal_frame * spawn_rate as f64).floor() as usize).max(1)
}

/// Convert a spherical sample around +Z into a velocity vector
pub fn spherical_velocity(azimuth: f32, polar: f32, speed: f32) -> Vec3 {
    let (sin_theta, cos_theta) = polar.sin_cos();
    let (sin_phi, cos_phi) = azimuth.sin_cos();
    Vec3::new(
        speed * sin_theta * cos_phi,
        speed * sin_theta * sin_phi,
        speed * cos_theta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_count_matches_rate_times_delta() {
        let mut emitter = Emitter::default();
        assert_eq!(emitter.spawn_count(10_000.0, 0.001), 10);
        let mut emitter = Emitter::default();
        assert_eq!(emitter.spawn_count(10_000.0, 0.016), 160);
    }

    #[test]
    fn spawn_count_caps_bursts_after_a_stall() {
        let mut emitter = Emitter::default();
        // 10 000 particles requested, one nominal frame allows 160
        assert_eq!(emitter.spawn_count(10_000.0, 1.0), 160);
        // The backlog is not carried into the next frame
        assert_eq!(emitter.spawn_count(10_000.0, 0.001), 10);
    }

    #[test]
    fn slow_rate_stall_spawns_at_most_one_frame() {
        let mut emitter = Emitter::default();
        let n = emitter.spawn_count(10.0, 1.0);
        assert!(n <= 10);
        assert_eq!(n, burst_ceiling(10.0, NOMINAL_FRAME));
    }

    #[test]
    fn fractional_rates_accumulate() {
        let mut emitter = Emitter::default();
        // 10/s at 0.05 s per frame: half a particle per frame
        assert_eq!(emitter.spawn_count(10.0, 0.05), 0);
        assert_eq!(emitter.spawn_count(10.0, 0.05), 1);
        assert_eq!(emitter.spawn_count(10.0, 0.05), 0);
        assert_eq!(emitter.spawn_count(10.0, 0.05), 1);
    }

    #[test]
    fn zero_rate_or_delta_spawns_nothing() {
        let mut emitter = Emitter::default();
        assert_eq!(emitter.spawn_count(0.0, 0.016), 0);
        assert_eq!(emitter.spawn_count(100.0, 0.0), 0);
        assert_eq!(emitter.spawn_count(f32::NAN, 0.016), 0);
    }

    #[test]
    fn emit_initializes_particles_at_origin() {
        let mut pool = ParticlePool::new(100);
        let mut rng = RandomSource::new(42);
        let mut emitter = Emitter::default();
        let preset = PresetConfig::fire();

        let report = emitter.emit(&mut pool, &preset, &mut rng, 0.01, 0.1);
        assert_eq!(report.requested, 10);
        assert_eq!(report.spawned, 10);
        assert!(!report.exhausted);

        let live: Vec<_> = pool.iter().filter(|p| p.is_live()).collect();
        assert_eq!(live.len(), 10);
        for p in live {
            assert_eq!(p.position, Vec3::ZERO);
            assert!(p.life >= 0.3 - 1e-6 && p.life <= 0.5 + 1e-6);
            assert_eq!(p.life, p.initial_life);
            assert_eq!(p.size, preset.initial_size);
            assert_eq!(p.color, preset.initial_color);
            let speed = p.velocity.length();
            assert!(speed >= preset.min_speed - 1e-4 && speed <= preset.max_speed + 1e-4);
        }
    }

    #[test]
    fn emit_respects_spread_cone() {
        let mut pool = ParticlePool::new(200);
        let mut rng = RandomSource::new(5);
        let mut emitter = Emitter::default();
        let preset = PresetConfig::fire();
        emitter.emit(&mut pool, &preset, &mut rng, 0.016, 1.0);

        for p in pool.iter().filter(|p| p.is_live()) {
            let dir = p.velocity.normalize();
            let angle = dir.z.clamp(-1.0, 1.0).acos();
            assert!(angle <= preset.spread + 1e-3);
        }
    }

    #[test]
    fn emit_stops_when_pool_is_full() {
        let mut pool = ParticlePool::new(5);
        let mut rng = RandomSource::new(1);
        let mut emitter = Emitter::default();
        let preset = PresetConfig::fire();

        let report = emitter.emit(&mut pool, &preset, &mut rng, 0.016, 0.1);
        assert_eq!(report.requested, 16);
        assert_eq!(report.spawned, 5);
        assert!(report.exhausted);
        assert_eq!(pool.iter().filter(|p| p.is_live()).count(), 5);
    }

    #[test]
    fn emit_tolerates_crossed_bounds() {
        let mut pool = ParticlePool::new(400);
        let mut rng = RandomSource::new(9);
        let mut emitter = Emitter::default();
        let mut preset = PresetConfig::comet();
        preset.min_speed = 2.0;
        preset.max_speed = 1.0;

        emitter.emit(&mut pool, &preset, &mut rng, 0.016, 1.0);
        for p in pool.iter().filter(|p| p.is_live()) {
            assert!(p.life >= 0.873 - 1e-4 && p.life <= 4.128 + 1e-4);
            assert!(p.velocity.is_finite());
            let speed = p.velocity.length();
            assert!(speed >= 1.0 - 1e-4 && speed <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn zero_life_preset_spawns_nothing() {
        let mut pool = ParticlePool::new(50);
        let mut rng = RandomSource::new(3);
        let mut emitter = Emitter::default();
        let mut preset = PresetConfig::fire();
        preset.min_life = 0.0;
        preset.max_life = 0.0;

        let report = emitter.emit(&mut pool, &preset, &mut rng, 0.001, 0.1);
        assert_eq!(report.spawned, 0);
        assert!(pool.iter().all(|p| !p.is_live()));
    }

    #[test]
    fn spherical_velocity_axes() {
        let up = spherical_velocity(0.0, 0.0, 2.0);
        assert!((up - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);

        let side = spherical_velocity(0.0, std::f32::consts::FRAC_PI_2, 1.0);
        assert!((side - Vec3::X).length() < 1e-6);
    }
}
