//! F11 fullscreen toggle.
//!
//! The [`FullScreen`] resource is present while the game wants fullscreen.
//! Entering sizes the window to the current monitor before switching; leaving
//! switches back and restores the window size from [`GameConfig`]. The
//! renderer sees the new size through the window resize system next frame.

use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::RaylibHandle;
use raylib::ffi;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchFullScreenEvent {}

fn monitor_size() -> (i32, i32) {
    unsafe {
        let monitor = ffi::GetCurrentMonitor();
        (ffi::GetMonitorWidth(monitor), ffi::GetMonitorHeight(monitor))
    }
}

/// Returns whether the window ended up fullscreen.
fn enter_fullscreen(rl: &mut RaylibHandle) -> bool {
    if !rl.is_window_fullscreen() {
        let (width, height) = monitor_size();
        info!("Going fullscreen at {}x{}", width, height);
        rl.set_window_size(width, height);
        rl.toggle_fullscreen();
    }
    rl.is_window_fullscreen()
}

/// Returns whether the window ended up windowed.
fn leave_fullscreen(rl: &mut RaylibHandle, size: (u32, u32)) -> bool {
    if rl.is_window_fullscreen() {
        rl.toggle_fullscreen();
        rl.set_window_size(size.0 as i32, size.1 as i32);
        rl.restore_window();
    }
    !rl.is_window_fullscreen()
}

pub fn switch_fullscreen_observer(
    _trigger: On<SwitchFullScreenEvent>,
    mut rl: NonSendMut<RaylibHandle>,
    mut commands: Commands,
    fullscreen: Option<Res<FullScreen>>,
    config: Res<GameConfig>,
) {
    let wants_fullscreen = fullscreen.is_none();
    let switched = if wants_fullscreen {
        commands.insert_resource(FullScreen {});
        enter_fullscreen(&mut rl)
    } else {
        commands.remove_resource::<FullScreen>();
        leave_fullscreen(&mut rl, config.window_size())
    };

    match (wants_fullscreen, switched) {
        (true, true) => info!("Fullscreen on"),
        (false, true) => info!("Fullscreen off"),
        (true, false) => warn!("Window did not enter fullscreen"),
        (false, false) => warn!("Window did not leave fullscreen"),
    }
}
