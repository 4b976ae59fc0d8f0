//! Fullscreen state.
//!
//! Present while the window is fullscreen. F11 toggles it; leaving
//! fullscreen restores the window size from the config.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct FullScreen {}
