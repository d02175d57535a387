//! Back-to-front ordering of live particles

use crate::particle::ParticlePool;

/// Lightweight ordering key for one live slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    /// Squared camera distance
    pub distance: f32,
    pub slot: u32,
}

/// Collect keys for every slot simulated this tick, in slot order.
///
/// Slots carrying the inactive sentinel are skipped, so the key count equals
/// the live count the integrator just computed.
pub fn collect_keys(pool: &ParticlePool, keys: &mut Vec<SortKey>) {
    keys.clear();
    keys.extend(
        pool.iter()
            .enumerate()
            .filter(|(_, p)| p.camera_distance >= 0.0)
            .map(|(slot, p)| SortKey {
                distance: p.camera_distance,
                slot: slot as u32,
            }),
    );
}

/// Order keys farthest first so alpha blending composites back to front.
///
/// Equal distances keep ascending slot order, making the result independent
/// of the sort algorithm.
pub fn sort_back_to_front(keys: &mut [SortKey]) {
    keys.sort_unstable_by(|a, b| {
        b.distance
            .total_cmp(&a.distance)
            .then_with(|| a.slot.cmp(&b.slot))
    });
}
