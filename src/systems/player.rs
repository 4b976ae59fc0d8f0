//! Player systems.
//!
//! - [`player_controller`] turns held keybindings into queued movements
//! - [`apply_movement`] drains movement queues into positions
//! - [`camera_follow`] keeps an attached camera on its entity
//! - [`update_coordinates_text`] and [`update_hearts`] refresh the HUD
//! - [`player_escape_observer`] leaves the dungeon on Escape
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::player::{
    CoordinatesText, Health, Heart, JUMP_HEIGHT, MovementQueue, PLAYER_SPEED, Player,
    PlayerController, heart_layout,
};
use crate::components::position::Position;
use crate::components::screen::ScreenKind;
use crate::components::sprite::Sprite;
use crate::components::text::Text;
use crate::components::textcomponent::composed;
use crate::events::input::{KeyAction, KeyboardInputEvent};
use crate::events::screen::SetScreenEvent;
use crate::resources::input::{GameInputHandler, Keybinding};
use crate::resources::renderer::{CameraTarget, GameRenderer};
use crate::resources::worldtime::WorldTime;

pub fn player_controller(
    input: Res<GameInputHandler>,
    time: Res<WorldTime>,
    mut players: Query<(&mut PlayerController, &mut MovementQueue)>,
) {
    for (mut controller, mut queue) in players.iter_mut() {
        if input.is_down(Keybinding::move_right()) {
            queue.push(PLAYER_SPEED * time.delta, 0.0);
        }
        if input.is_down(Keybinding::move_left()) {
            queue.push(-PLAYER_SPEED * time.delta, 0.0);
        }
        if input.is_down(Keybinding::jump()) && controller.jump_armed {
            queue.push(0.0, JUMP_HEIGHT);
            controller.jump_armed = false;
        }
        if input.was_released(Keybinding::jump()) {
            controller.jump_armed = true;
        }
    }
}

pub fn apply_movement(mut query: Query<(&mut Position, &mut MovementQueue)>) {
    for (mut position, mut queue) in query.iter_mut() {
        if queue.is_empty() {
            continue;
        }
        let (dx, dy) = queue
            .0
            .drain(..)
            .fold((0.0, 0.0), |(x, y), step| (x + step.x, y + step.y));
        if !position.translate(dx, dy) {
            debug!("Dropped movement of an immutable position");
        }
    }
}

pub fn camera_follow(
    mut renderer: ResMut<GameRenderer>,
    moved: Query<(Entity, &Position), Changed<Position>>,
) {
    let Some(CameraTarget::Entity(target)) = renderer.camera().map(|c| c.target) else {
        return;
    };
    if let Ok((_, position)) = moved.get(target) {
        renderer.camera_changed(position.point());
    }
}

pub fn coordinates_markup(position: &Position) -> String {
    composed(
        "<yellow>X: {} Y: {}",
        &[&format!("{:.2}", position.x()), &format!("{:.2}", position.y())],
    )
}

pub fn update_coordinates_text(
    players: Query<&Position, (With<Player>, Changed<Position>)>,
    mut texts: Query<&mut Text, With<CoordinatesText>>,
) {
    let Some(position) = players.iter().next() else {
        return;
    };
    let markup = coordinates_markup(position);
    for mut text in texts.iter_mut() {
        text.set_markup(&markup);
    }
}

pub fn update_hearts(
    players: Query<&Health, (With<Player>, Changed<Health>)>,
    mut hearts: Query<(&Heart, &mut Sprite)>,
) {
    let Some(health) = players.iter().next() else {
        return;
    };
    let layout = heart_layout(health.current, health.max);
    for (heart, mut sprite) in hearts.iter_mut() {
        if let Some(slot) = layout.get(heart.index) {
            sprite.texture = slot.kind.texture();
        }
    }
}

pub fn player_escape_observer(
    trigger: On<KeyboardInputEvent>,
    input: Res<GameInputHandler>,
    renderer: Res<GameRenderer>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.action != KeyAction::Press || event.key != input.key_code(Keybinding::escape()) {
        return;
    }
    if renderer
        .current_screen()
        .is_some_and(|screen| screen.kind == ScreenKind::Dungeon)
    {
        commands.trigger(SetScreenEvent {
            kind: ScreenKind::Title,
        });
    }
}
