//! Physics step: age, forces, position, and lifetime ramps

use crate::curves::{lerp_f32, normalized_age};
use crate::particle::{ParticlePool, INACTIVE_DISTANCE};
use crate::preset::PresetConfig;
use glam::Vec3;

/// Advance every live particle by `dt` simulated seconds.
///
/// Gravity acts along +Z and is applied as a half step (`v += g * dt * 0.5`)
/// before the position update. Wind pushes along +Y in proportion to the
/// particle's normalized age and is not accumulated into the velocity.
///
/// Slots that were already dead get `INACTIVE_DISTANCE`. A particle whose life
/// runs out during this step is still simulated and counted this tick and is
/// treated as free from the next one. Returns the number of particles
/// processed as live, which also becomes the pool's live count.
pub fn integrate(pool: &mut ParticlePool, preset: &PresetConfig, camera: Vec3, dt: f32) -> usize {
    let gravity = Vec3::new(0.0, 0.0, preset.gravity);
    let mut live = 0;

    for p in pool.slots_mut() {
        if !p.is_live() {
            p.camera_distance = INACTIVE_DISTANCE;
            continue;
        }

        p.life -= dt;
        let age = normalized_age(p.initial_life, p.life);
        let wind = Vec3::new(0.0, preset.wind, 0.0) * age;

        p.velocity += gravity * dt * 0.5;
        p.position += (p.velocity + wind) * dt;

        p.size = lerp_f32(preset.initial_size, preset.final_size, age);
        p.color = preset.initial_color.lerp(&preset.final_color, age);
        p.camera_distance = p.position.distance_squared(camera);

        live += 1;
    }

    pool.set_live_count(live);
    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;

    fn pool_with(particles: &[(f32, Vec3)]) -> ParticlePool {
        let mut pool = ParticlePool::new(particles.len() + 2);
        for (i, (life, velocity)) in particles.iter().enumerate() {
            let p = pool.get_mut(i).unwrap();
            *p = Particle::dead();
            p.life = *life;
            p.initial_life = *life;
            p.velocity = *velocity;
        }
        pool
    }

    fn still_preset() -> PresetConfig {
        PresetConfig {
            gravity: 0.0,
            wind: 0.0,
            ..PresetConfig::fire()
        }
    }

    #[test]
    fn life_decreases_and_count_is_recomputed() {
        let mut pool = pool_with(&[(1.0, Vec3::ZERO), (2.0, Vec3::ZERO)]);
        let live = integrate(&mut pool, &still_preset(), Vec3::ZERO, 0.25);
        assert_eq!(live, 2);
        assert_eq!(pool.live_count(), 2);
        assert!((pool.get(0).unwrap().life - 0.75).abs() < 1e-6);
        assert!((pool.get(1).unwrap().life - 1.75).abs() < 1e-6);
    }

    #[test]
    fn dead_slots_get_sentinel_distance() {
        let mut pool = pool_with(&[(1.0, Vec3::ZERO)]);
        pool.get_mut(1).unwrap().camera_distance = 12.0;
        integrate(&mut pool, &still_preset(), Vec3::new(1.0, 0.0, 0.0), 0.1);
        assert!((pool.get(0).unwrap().camera_distance - 1.0).abs() < 1e-6);
        assert_eq!(pool.get(1).unwrap().camera_distance, INACTIVE_DISTANCE);
        assert_eq!(pool.get(2).unwrap().camera_distance, INACTIVE_DISTANCE);
    }

    #[test]
    fn expiring_particle_counts_once_then_retires() {
        let mut pool = pool_with(&[(0.05, Vec3::ZERO)]);
        assert_eq!(integrate(&mut pool, &still_preset(), Vec3::ZERO, 0.1), 1);
        assert!(!pool.get(0).unwrap().is_live());
        assert_eq!(integrate(&mut pool, &still_preset(), Vec3::ZERO, 0.1), 0);
        assert_eq!(pool.get(0).unwrap().camera_distance, INACTIVE_DISTANCE);
    }

    #[test]
    fn gravity_is_a_half_step() {
        let preset = PresetConfig {
            gravity: -10.0,
            wind: 0.0,
            ..PresetConfig::fire()
        };
        let mut pool = pool_with(&[(10.0, Vec3::ZERO)]);
        integrate(&mut pool, &preset, Vec3::ZERO, 0.1);
        let p = pool.get(0).unwrap();
        // v = -10 * 0.1 * 0.5, x = v * 0.1
        assert!((p.velocity.z - (-0.5)).abs() < 1e-6);
        assert!((p.position.z - (-0.05)).abs() < 1e-6);
    }

    #[test]
    fn wind_scales_with_age_and_is_not_accumulated() {
        let preset = PresetConfig {
            gravity: 0.0,
            wind: 1.0,
            ..PresetConfig::fire()
        };
        let mut pool = pool_with(&[(1.0, Vec3::ZERO)]);
        integrate(&mut pool, &preset, Vec3::ZERO, 0.5);
        let p = pool.get(0).unwrap();
        // age = 0.5, wind offset = 0.5, displacement = 0.5 * 0.5
        assert!((p.position.y - 0.25).abs() < 1e-6);
        assert_eq!(p.velocity, Vec3::ZERO);
    }

    #[test]
    fn ramps_follow_normalized_age() {
        let preset = still_preset();
        let mut pool = pool_with(&[(4.0, Vec3::ZERO)]);
        integrate(&mut pool, &preset, Vec3::ZERO, 1.0);
        let p = pool.get(0).unwrap();
        let expected_size = lerp_f32(preset.initial_size, preset.final_size, 0.25);
        assert!((p.size - expected_size).abs() < 1e-6);
        let expected = preset.initial_color.lerp(&preset.final_color, 0.25);
        assert!((p.color.r - expected.r).abs() < 1e-6);
        assert!((p.color.a - expected.a).abs() < 1e-6);
    }

    #[test]
    fn ramps_clamp_on_the_expiring_tick() {
        let preset = still_preset();
        let mut pool = pool_with(&[(0.1, Vec3::ZERO)]);
        integrate(&mut pool, &preset, Vec3::ZERO, 1.0);
        let p = pool.get(0).unwrap();
        assert!((p.size - preset.final_size).abs() < 1e-6);
        for (got, want) in p.color.to_array().iter().zip(preset.final_color.to_array()) {
            assert!((got - want).abs() < 1e-6);
        }
    }
}
