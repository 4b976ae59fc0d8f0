//! Registry of named one-shot systems.
//!
//! Screen enter systems are registered once at startup and stored here under
//! [`ScreenKind::enter_system`](crate::components::screen::ScreenKind::enter_system),
//! so the screen switch observer can run them by name.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

#[derive(Resource, Default)]
pub struct SystemsStore {
    map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }
}
