//! Frame statistics for the debug overlay.
//!
//! Frames are counted every frame so the first refresh after F1 is already
//! meaningful. Memory is only queried when the texts are rebuilt.
use bevy_ecs::prelude::*;

use crate::resources::debugmode::{FrameStats, MemoryUsage};
use crate::resources::worldtime::WorldTime;

fn memory_usage() -> Option<MemoryUsage> {
    memory_stats::memory_stats().map(|stats| MemoryUsage {
        physical: stats.physical_mem,
        virtual_mem: stats.virtual_mem,
    })
}

pub fn frame_stats_system(time: Res<WorldTime>, mut stats: ResMut<FrameStats>) {
    if stats.record_frame(time.delta) {
        stats.refresh(memory_usage());
    }
}
