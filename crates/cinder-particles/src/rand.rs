//! Seeded xorshift32 random source for spawn attributes

use std::f32::consts::TAU;

/// Deterministic-given-seed uniform sampler
///
/// Every stochastic spawn attribute is drawn from one of these, so a fixed
/// seed reproduces a run exactly.
pub struct RandomSource {
    state: u32,
}

impl RandomSource {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits fit the f32 mantissa exactly, so 1.0 is never produced
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float between `a` and `b`, in either order.
    ///
    /// Bounds edited independently can cross; they are normalized here
    /// rather than rejected.
    pub fn range(&mut self, a: f32, b: f32) -> f32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        (lo + self.next_f32() * (hi - lo)).min(hi)
    }

    /// Returns an angle in [0, 2π)
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * TAU
    }
}
