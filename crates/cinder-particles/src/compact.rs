//! Dense, render-ready particle attributes
//!
//! The pool is sparse; the renderer wants tightly packed per-instance arrays
//! holding only the particles simulated this tick, in draw order.

use crate::particle::ParticlePool;
use crate::sort::SortKey;
use bytemuck::{Pod, Zeroable};

/// Interleaved per-instance layout, for renderers that prefer one buffer.
/// 48 bytes, 16-byte rows.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub pos_size: [f32; 4], // xyz = position, w = size
    pub color: [f32; 4],    // rgba
    pub life: [f32; 4],     // x = remaining life, y = initial life
}

/// Parallel attribute arrays, all of length `len()`
#[derive(Debug, Default)]
pub struct DrawBuffer {
    positions: Vec<[f32; 3]>,
    sizes: Vec<f32>,
    colors: Vec<[u8; 4]>,
    lives: Vec<f32>,
    initial_lives: Vec<f32>,
}

impl DrawBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            sizes: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            lives: Vec::with_capacity(capacity),
            initial_lives: Vec::with_capacity(capacity),
        }
    }

    /// Rebuild from `keys`, gathering each keyed slot once in key order
    pub fn compact(&mut self, pool: &ParticlePool, keys: &[SortKey]) {
        self.clear();
        for key in keys {
            let Some(p) = pool.get(key.slot as usize) else {
                continue;
            };
            self.positions.push(p.position.to_array());
            self.sizes.push(p.size);
            self.colors.push(p.color.to_rgba8());
            self.lives.push(p.life);
            self.initial_lives.push(p.initial_life);
        }
        debug_assert!(self.len() <= pool.capacity());
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.sizes.clear();
        self.colors.clear();
        self.lives.clear();
        self.initial_lives.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    pub fn lives(&self) -> &[f32] {
        &self.lives
    }

    pub fn initial_lives(&self) -> &[f32] {
        &self.initial_lives
    }

    // Raw views for GPU upload

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn life_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lives)
    }

    pub fn initial_life_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.initial_lives)
    }

    /// Pack the arrays into the interleaved instance layout
    pub fn interleaved(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend((0..self.len()).map(|i| {
            let [x, y, z] = self.positions[i];
            let [r, g, b, a] = self.colors[i];
            ParticleInstance {
                pos_size: [x, y, z, self.sizes[i]],
                color: [
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                    a as f32 / 255.0,
                ],
                life: [self.lives[i], self.initial_lives[i], 0.0, 0.0],
            }
        }));
    }
}
