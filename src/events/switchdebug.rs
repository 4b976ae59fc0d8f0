//! Debug overlay toggle.
//!
//! F1 triggers [`SwitchDebugEvent`]. The observer flips the presence of the
//! [`DebugMode`] resource; the render system draws the frame statistics
//! overlay only while it exists.
use crate::resources::debugmode::{DebugMode, FrameStats};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

/// Toggle [`DebugMode`]. Turning it on also restarts the statistics window so
/// the first overlay refresh comes a full second later.
pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
    mut stats: ResMut<FrameStats>,
) {
    if debug_mode.is_some() {
        commands.remove_resource::<DebugMode>();
        info!("Debug overlay disabled");
    } else {
        stats.reset();
        commands.insert_resource(DebugMode {});
        info!("Debug overlay enabled");
    }
}
