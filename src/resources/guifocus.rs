//! Keyboard focus of the current screen's widgets.
//!
//! Holds the widget reached by the last Tab press. Cleared whenever the
//! screen changes.

use bevy_ecs::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuiFocus {
    pub tabbed: Option<Entity>,
}

impl GuiFocus {
    pub fn clear(&mut self) {
        self.tabbed = None;
    }

    pub fn is_tabbed(&self, entity: Entity) -> bool {
        self.tabbed == Some(entity)
    }
}
