//! Screen switch event and observer.
//!
//! Triggering [`SetScreenEvent`] hands the new screen to the
//! [`GameRenderer`] state machine, despawns the entities of every screen the
//! renderer discarded (dropping the [`Dungeon`] with its screen), clears
//! keyboard focus, and finally runs the new
//! screen's enter system (looked up in [`SystemsStore`] under
//! [`ScreenKind::enter_system`]) to populate it.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::screen::{ScreenKind, ScreenOwned};
use crate::resources::dungeon::Dungeon;
use crate::resources::guifocus::GuiFocus;
use crate::resources::renderer::GameRenderer;
use crate::resources::systemsstore::SystemsStore;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetScreenEvent {
    pub kind: ScreenKind,
}

pub fn set_screen_observer(
    trigger: On<SetScreenEvent>,
    mut commands: Commands,
    mut renderer: ResMut<GameRenderer>,
    mut focus: ResMut<GuiFocus>,
    owned: Query<(Entity, &ScreenOwned)>,
    systems_store: Res<SystemsStore>,
) {
    let kind = trigger.event().kind;
    let transition = renderer.set_current_screen(kind);
    info!(
        "Switching to {:?} screen{}",
        kind,
        if transition.overlaying { " (overlay)" } else { "" }
    );

    let mut despawned = 0;
    for (entity, owner) in owned.iter() {
        if transition.discarded.contains(&owner.0) {
            commands.entity(entity).despawn();
            despawned += 1;
        }
    }
    debug!("Despawned {} entities of discarded screens", despawned);

    if transition.discarded.iter().any(|h| h.kind == ScreenKind::Dungeon) {
        commands.remove_resource::<Dungeon>();
        debug!("Dungeon dropped with its screen");
    }

    focus.clear();

    match systems_store.get(kind.enter_system()) {
        Some(id) => commands.run_system(*id),
        None => warn!("No enter system registered for {:?}", kind),
    }
}
