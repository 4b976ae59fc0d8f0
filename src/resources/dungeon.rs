//! The dungeon being played.
//!
//! Only the seed and the player entity for now; generation is not part of the
//! game yet.

use bevy_ecs::prelude::*;
use fastrand::Rng;

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dungeon {
    pub seed: i64,
    pub player: Option<Entity>,
}

impl Dungeon {
    pub fn new(seed: i64) -> Self {
        Self { seed, player: None }
    }

    /// Dungeon with a seed drawn from `rng`.
    pub fn random(rng: &mut Rng) -> Self {
        Self::new(seed_from_bits(rng.u64(..)))
    }
}

/// Low 63 bits as the magnitude, negated when odd.
pub fn seed_from_bits(bits: u64) -> i64 {
    let seed = (bits & i64::MAX as u64) as i64;
    if bits % 2 == 0 { seed } else { -seed }
}
