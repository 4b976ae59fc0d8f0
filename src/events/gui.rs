//! GUI element events.
//!
//! [`GuiElementEvent`] is triggered for a single widget entity when the
//! cursor starts or stops hovering it, or when it is clicked (by the mouse or
//! by Enter on the tabbed widget). [`TabulateEvent`] asks the focus walker to
//! move to the next selectable widget of the current screen.

use bevy_ecs::prelude::*;

use crate::events::input::KeyAction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuiEventKind {
    Hover { ended: bool },
    Click { button: i32, modifiers: u32, action: KeyAction },
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GuiElementEvent {
    pub entity: Entity,
    pub kind: GuiEventKind,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TabulateEvent {}
