//! Raw keyboard and mouse events.
//!
//! The input system polls raylib once per frame and triggers a
//! [`KeyboardInputEvent`] for every key pressed or released and a
//! [`MouseInputEvent`] for every mouse button pressed, held or released.
//! Key codes are raylib/GLFW key codes, the same integers the keymap file
//! stores.
//!
//! Modifier masks follow the GLFW layout. [`MOD_TAB_ACTION`] marks clicks
//! synthesized by keyboard navigation rather than by the mouse.

use bevy_ecs::prelude::*;

pub const MOD_SHIFT: u32 = 0x01;
pub const MOD_CONTROL: u32 = 0x02;
pub const MOD_ALT: u32 = 0x04;
pub const MOD_SUPER: u32 = 0x08;
pub const MOD_TAB_ACTION: u32 = 0x80;

pub const MOUSE_BUTTON_1: i32 = 0;
pub const MOUSE_BUTTON_2: i32 = 1;
pub const MOUSE_BUTTON_3: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardInputEvent {
    pub key: i32,
    pub modifiers: u32,
    pub action: KeyAction,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MouseInputEvent {
    pub button: i32,
    pub modifiers: u32,
    pub action: KeyAction,
}
