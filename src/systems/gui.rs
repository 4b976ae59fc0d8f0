//! GUI dispatch.
//!
//! Hover is edge triggered: [`gui_hover_system`] compares every widget of the
//! current screen against the cursor each frame and triggers a
//! [`GuiElementEvent`] only when the hovered state has to change. The tabbed
//! widget keeps its hover until the tab walk moves on. Widgets of a screen
//! that is no longer current (overlaid or discarded) are un-hovered.
//!
//! Observers:
//! - [`gui_hover_observer`] stores the hovered flag
//! - [`gui_mouse_observer`] turns mouse input into clicks on widgets under
//!   the cursor
//! - [`gui_keyboard_observer`] handles Tab (walk) and Enter (click the tabbed
//!   widget)
//! - [`tabulate_observer`] walks the focus to the next selectable widget
//! - [`button_action_observer`] runs a button's action on left release
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::boundingbox::BoundingBox;
use crate::components::gui::{Button, ButtonAction, GuiElement, next_tab};
use crate::components::position::Position;
use crate::components::screen::{ScreenKind, ScreenOwned};
use crate::events::gui::{GuiElementEvent, GuiEventKind, TabulateEvent};
use crate::events::input::{
    KeyAction, KeyboardInputEvent, MOD_ALT, MOD_TAB_ACTION, MOUSE_BUTTON_1, MOUSE_BUTTON_2,
    MouseInputEvent,
};
use crate::events::screen::SetScreenEvent;
use crate::resources::guifocus::GuiFocus;
use crate::resources::input::GameInputHandler;
use crate::resources::renderer::GameRenderer;
use crate::systems::input::{KEY_ENTER, KEY_TAB};

type WidgetQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static GuiElement,
        &'static Position,
        &'static BoundingBox,
        &'static ScreenOwned,
    ),
>;

fn under_cursor(
    renderer: &GameRenderer,
    input: &GameInputHandler,
    position: &Position,
    bounding_box: &BoundingBox,
) -> bool {
    let cursor = input.cursor();
    bounding_box.contains_point(
        renderer.layout_x(position.x()),
        position.y(),
        cursor.x,
        cursor.y,
    )
}

pub fn gui_hover_system(
    renderer: Res<GameRenderer>,
    input: Res<GameInputHandler>,
    focus: Res<GuiFocus>,
    widgets: WidgetQuery,
    mut commands: Commands,
) {
    for (entity, element, position, bounding_box, owner) in widgets.iter() {
        // Widgets under an overlay only lose their hover
        let inside = renderer.is_current(owner.0)
            && under_cursor(&renderer, &input, position, bounding_box);
        if inside && !element.hovered {
            commands.trigger(GuiElementEvent {
                entity,
                kind: GuiEventKind::Hover { ended: false },
            });
        } else if !inside && element.hovered && !focus.is_tabbed(entity) {
            commands.trigger(GuiElementEvent {
                entity,
                kind: GuiEventKind::Hover { ended: true },
            });
        }
    }
}

pub fn gui_hover_observer(trigger: On<GuiElementEvent>, mut elements: Query<&mut GuiElement>) {
    let event = trigger.event();
    let GuiEventKind::Hover { ended } = event.kind else {
        return;
    };
    if let Ok(mut element) = elements.get_mut(event.entity) {
        element.hovered = !ended;
    }
}

pub fn gui_mouse_observer(
    trigger: On<MouseInputEvent>,
    renderer: Res<GameRenderer>,
    input: Res<GameInputHandler>,
    widgets: WidgetQuery,
    mut commands: Commands,
) {
    let event = trigger.event();
    for (entity, _, position, bounding_box, owner) in widgets.iter() {
        if renderer.is_current(owner.0) && under_cursor(&renderer, &input, position, bounding_box) {
            commands.trigger(GuiElementEvent {
                entity,
                kind: GuiEventKind::Click {
                    button: event.button,
                    modifiers: event.modifiers,
                    action: event.action,
                },
            });
        }
    }
}

pub fn gui_keyboard_observer(
    trigger: On<KeyboardInputEvent>,
    focus: Res<GuiFocus>,
    mut commands: Commands,
) {
    let event = trigger.event();
    match (event.key, event.action) {
        (KEY_TAB, KeyAction::Press) => commands.trigger(TabulateEvent {}),
        (KEY_ENTER, KeyAction::Release) => {
            if let Some(entity) = focus.tabbed {
                let button = if event.modifiers & MOD_ALT != 0 {
                    MOUSE_BUTTON_2
                } else {
                    MOUSE_BUTTON_1
                };
                commands.trigger(GuiElementEvent {
                    entity,
                    kind: GuiEventKind::Click {
                        button,
                        modifiers: event.modifiers | MOD_TAB_ACTION,
                        action: KeyAction::Release,
                    },
                });
            }
        }
        _ => {}
    }
}

pub fn tabulate_observer(
    _trigger: On<TabulateEvent>,
    renderer: Res<GameRenderer>,
    mut focus: ResMut<GuiFocus>,
    widgets: Query<(Entity, &GuiElement, &ScreenOwned)>,
    mut commands: Commands,
) {
    let mut order: Vec<(usize, Entity, bool)> = widgets
        .iter()
        .filter(|(_, _, owner)| renderer.is_current(owner.0))
        .map(|(entity, element, _)| (element.order, entity, element.selectable))
        .collect();
    order.sort_by_key(|(index, entity, _)| (*index, *entity));

    let selectable: Vec<bool> = order.iter().map(|(_, _, s)| *s).collect();
    let last = focus
        .tabbed
        .and_then(|tabbed| order.iter().position(|(_, entity, _)| *entity == tabbed));
    let next = next_tab(last, &selectable).map(|i| order[i].1);

    if let Some(previous) = focus.tabbed {
        commands.trigger(GuiElementEvent {
            entity: previous,
            kind: GuiEventKind::Hover { ended: true },
        });
    }
    if let Some(entity) = next {
        commands.trigger(GuiElementEvent {
            entity,
            kind: GuiEventKind::Hover { ended: false },
        });
    }
    debug!("Tab focus {:?} -> {:?}", focus.tabbed, next);
    focus.tabbed = next;
}

pub fn button_action_observer(
    trigger: On<GuiElementEvent>,
    buttons: Query<&Button>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let GuiEventKind::Click { button, action, .. } = event.kind else {
        return;
    };
    if button != MOUSE_BUTTON_1 || action != KeyAction::Release {
        return;
    }
    let Some(action) = buttons.get(event.entity).ok().and_then(|b| b.action) else {
        return;
    };
    let kind = match action {
        ButtonAction::NewGame => ScreenKind::Dungeon,
        ButtonAction::Options => ScreenKind::Options,
        ButtonAction::BackToTitle => ScreenKind::Title,
    };
    commands.trigger(SetScreenEvent { kind });
}
