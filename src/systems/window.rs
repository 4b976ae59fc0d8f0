//! Window size tracking.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::renderer::GameRenderer;

/// Forward window size changes to the renderer.
pub fn window_resize_system(rl: NonSend<raylib::RaylibHandle>, mut renderer: ResMut<GameRenderer>) {
    let size = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    if renderer.window_size() != size {
        debug!("Window resized to {}x{}", size.0, size.1);
        renderer.window_resized(size.0, size.1);
    }
}
