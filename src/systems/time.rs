//! Time update.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance [`WorldTime`] by the unscaled frame delta `dt`, in seconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().advance(dt);
}
