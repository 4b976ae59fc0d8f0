//! Screen ownership and draw layers.
//!
//! Every entity spawned by a screen carries [`ScreenOwned`] with the handle of
//! the screen instance that created it. When the renderer discards a screen,
//! all entities owned by that handle are despawned. [`DrawSpace`] selects the
//! matrix an entity is drawn with.

use bevy_ecs::prelude::Component;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Title,
    Options,
    Dungeon,
}

impl ScreenKind {
    /// Overlay screens keep the previous screen drawing underneath.
    pub fn is_overlay(&self) -> bool {
        matches!(self, ScreenKind::Options)
    }

    /// Camera-aware screens draw their world layer through a camera.
    pub fn is_camera_aware(&self) -> bool {
        matches!(self, ScreenKind::Dungeon)
    }

    /// Name of the registered system that populates the screen.
    pub fn enter_system(&self) -> &'static str {
        match self {
            ScreenKind::Title => "enter_title",
            ScreenKind::Options => "enter_options",
            ScreenKind::Dungeon => "enter_dungeon",
        }
    }
}

/// One live instance of a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenHandle {
    pub kind: ScreenKind,
    pub id: u32,
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenOwned(pub ScreenHandle);

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawSpace {
    /// Drawn with the fixed projection (GUI, HUD, backgrounds).
    #[default]
    Projection,
    /// Drawn through the screen's camera.
    Camera,
}
