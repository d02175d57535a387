//! Value-over-lifetime interpolation (start → end linear)

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Elapsed fraction of a lifetime: 0 at spawn, 1 at expiry.
///
/// Clamped to [0, 1] so the tick that crosses expiry does not extrapolate.
pub fn normalized_age(initial_life: f32, life: f32) -> f32 {
    if initial_life <= 0.0 {
        return 1.0;
    }
    ((initial_life - life) / initial_life).clamp(0.0, 1.0)
}
