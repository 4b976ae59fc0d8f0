//! Input systems.
//!
//! - [`poll_input`] reads keyboard and mouse state from raylib once per frame,
//!   updates [`GameInputHandler`] and triggers the raw input events.
//! - [`global_keys_observer`] maps F1 to the debug overlay toggle and F11 to
//!   fullscreen.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::consts::{KeyboardKey, MouseButton};

use crate::events::input::{
    KeyAction, KeyboardInputEvent, MOD_ALT, MOD_CONTROL, MOD_SHIFT, MOD_SUPER, MOUSE_BUTTON_1,
    MOUSE_BUTTON_2, MOUSE_BUTTON_3, MouseInputEvent,
};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::input::GameInputHandler;
use crate::resources::renderer::GameRenderer;

pub const KEY_TAB: i32 = KeyboardKey::KEY_TAB as i32;
pub const KEY_ENTER: i32 = KeyboardKey::KEY_ENTER as i32;
pub const KEY_F1: i32 = KeyboardKey::KEY_F1 as i32;
pub const KEY_F11: i32 = KeyboardKey::KEY_F11 as i32;

const MOUSE_BUTTONS: [(i32, MouseButton); 3] = [
    (MOUSE_BUTTON_1, MouseButton::MOUSE_BUTTON_LEFT),
    (MOUSE_BUTTON_2, MouseButton::MOUSE_BUTTON_RIGHT),
    (MOUSE_BUTTON_3, MouseButton::MOUSE_BUTTON_MIDDLE),
];

/// Modifier mask from the held modifier keys.
fn current_modifiers(rl: &raylib::RaylibHandle) -> u32 {
    let held = |left: KeyboardKey, right: KeyboardKey| rl.is_key_down(left) || rl.is_key_down(right);
    let mut modifiers = 0;
    if held(KeyboardKey::KEY_LEFT_SHIFT, KeyboardKey::KEY_RIGHT_SHIFT) {
        modifiers |= MOD_SHIFT;
    }
    if held(KeyboardKey::KEY_LEFT_CONTROL, KeyboardKey::KEY_RIGHT_CONTROL) {
        modifiers |= MOD_CONTROL;
    }
    if held(KeyboardKey::KEY_LEFT_ALT, KeyboardKey::KEY_RIGHT_ALT) {
        modifiers |= MOD_ALT;
    }
    if held(KeyboardKey::KEY_LEFT_SUPER, KeyboardKey::KEY_RIGHT_SUPER) {
        modifiers |= MOD_SUPER;
    }
    modifiers
}

/// Poll raylib and feed the input handler.
///
/// Every key pressed this frame triggers a Press, every held key that came up
/// a Release. Mouse buttons trigger Press for every frame they are held and
/// Release on the frame they come up.
///
/// `held` remembers the raylib key of every code currently down so releases
/// can be queried without converting codes back.
pub fn poll_input(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    renderer: Res<GameRenderer>,
    mut input: ResMut<GameInputHandler>,
    mut held: Local<Vec<KeyboardKey>>,
    mut commands: Commands,
) {
    let modifiers = current_modifiers(&rl);
    input.begin_frame(modifiers);

    let mouse = rl.get_mouse_position();
    input.set_cursor(renderer.cursor_to_world(mouse.x, mouse.y));

    for key in take_released(&mut held, |key| rl.is_key_released(key)) {
        input.key_released(key);
        commands.trigger(KeyboardInputEvent {
            key,
            modifiers,
            action: KeyAction::Release,
        });
    }

    while let Some(pressed) = rl.get_key_pressed() {
        let key = remember_pressed(&mut held, pressed);
        input.key_pressed(key);
        commands.trigger(KeyboardInputEvent {
            key,
            modifiers,
            action: KeyAction::Press,
        });
    }

    for (button, mouse_button) in MOUSE_BUTTONS {
        if rl.is_mouse_button_down(mouse_button) {
            input.mouse_pressed(button);
            commands.trigger(MouseInputEvent {
                button,
                modifiers,
                action: KeyAction::Press,
            });
        } else if rl.is_mouse_button_released(mouse_button) {
            input.mouse_released(button);
            commands.trigger(MouseInputEvent {
                button,
                modifiers,
                action: KeyAction::Release,
            });
        }
    }
}

/// Drop the keys `is_up` reports released, returning their codes.
fn take_released(held: &mut Vec<KeyboardKey>, is_up: impl Fn(KeyboardKey) -> bool) -> Vec<i32> {
    let mut released = Vec::new();
    held.retain(|&key| {
        let up = is_up(key);
        if up {
            released.push(key as i32);
        }
        !up
    });
    released
}

fn remember_pressed(held: &mut Vec<KeyboardKey>, key: KeyboardKey) -> i32 {
    if !held.contains(&key) {
        held.push(key);
    }
    key as i32
}

pub fn global_keys_observer(trigger: On<KeyboardInputEvent>, mut commands: Commands) {
    let event = trigger.event();
    if event.action != KeyAction::Press {
        return;
    }
    match event.key {
        KEY_F1 => commands.trigger(SwitchDebugEvent {}),
        KEY_F11 => commands.trigger(SwitchFullScreenEvent {}),
        _ => {}
    }
}
