//! GUI dispatch on a bare World: hover tracking, the tab walk and clicks from
//! the mouse and from Enter.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use rogues_odyssey::components::boundingbox::BoundingBox;
use rogues_odyssey::components::gui::GuiElement;
use rogues_odyssey::components::position::{Point2D, Position};
use rogues_odyssey::components::screen::{ScreenKind, ScreenOwned};
use rogues_odyssey::events::gui::{GuiElementEvent, GuiEventKind, TabulateEvent};
use rogues_odyssey::events::input::{
    KeyAction, KeyboardInputEvent, MOD_ALT, MOD_TAB_ACTION, MOUSE_BUTTON_1, MOUSE_BUTTON_2,
    MouseInputEvent,
};
use rogues_odyssey::resources::guifocus::GuiFocus;
use rogues_odyssey::resources::input::GameInputHandler;
use rogues_odyssey::resources::renderer::GameRenderer;
use rogues_odyssey::systems::gui::{
    gui_hover_observer, gui_hover_system, gui_keyboard_observer, gui_mouse_observer,
    tabulate_observer,
};
use rogues_odyssey::systems::input::{KEY_ENTER, KEY_TAB};

#[derive(Resource, Default)]
struct Clicks(Vec<(Entity, i32, u32, KeyAction)>);

fn record_clicks(trigger: On<GuiElementEvent>, mut clicks: ResMut<Clicks>) {
    let event = trigger.event();
    if let GuiEventKind::Click {
        button,
        modifiers,
        action,
    } = event.kind
    {
        clicks.0.push((event.entity, button, modifiers, action));
    }
}

struct Widgets {
    top: Entity,
    label: Entity,
    bottom: Entity,
    stale: Entity,
}

/// Title screen with two selectable widgets around a passive label, plus a
/// widget owned by a screen that is no longer current.
fn make_world() -> (World, Widgets) {
    let mut world = World::new();
    let mut renderer = GameRenderer::new(800.0, 600.0);
    let stale_screen = renderer.set_current_screen(ScreenKind::Title).entered;
    let screen = renderer.set_current_screen(ScreenKind::Title).entered;
    world.insert_resource(renderer);
    world.insert_resource(GameInputHandler::default());
    world.insert_resource(GuiFocus::default());
    world.insert_resource(Clicks::default());

    let mut widget = |order: usize, selectable: bool, y: f32, owner| {
        let element = if selectable {
            GuiElement::selectable(order)
        } else {
            GuiElement::passive(order)
        };
        world
            .spawn((
                element,
                Position::fixed(0.0, y),
                BoundingBox::rectangle(2.0, 0.4),
                ScreenOwned(owner),
            ))
            .id()
    };
    let bottom = widget(3, true, -2.0, screen);
    let label = widget(2, false, 0.0, screen);
    let top = widget(1, true, 2.0, screen);
    let stale = widget(0, true, 2.0, stale_screen);

    world.add_observer(gui_hover_observer);
    world.add_observer(gui_mouse_observer);
    world.add_observer(gui_keyboard_observer);
    world.add_observer(tabulate_observer);
    world.add_observer(record_clicks);
    world.flush();

    (
        world,
        Widgets {
            top,
            label,
            bottom,
            stale,
        },
    )
}

fn hovered(world: &World, entity: Entity) -> bool {
    world.get::<GuiElement>(entity).unwrap().hovered
}

fn set_cursor(world: &mut World, x: f32, y: f32) {
    world
        .resource_mut::<GameInputHandler>()
        .set_cursor(Point2D::new(x, y));
}

fn run_hover(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(gui_hover_system);
    schedule.run(world);
}

fn tab(world: &mut World) {
    world.trigger(TabulateEvent {});
    world.flush();
}

fn key(world: &mut World, key: i32, modifiers: u32, action: KeyAction) {
    world.trigger(KeyboardInputEvent {
        key,
        modifiers,
        action,
    });
    world.flush();
}

#[test]
fn test_hover_follows_cursor() {
    let (mut world, widgets) = make_world();

    set_cursor(&mut world, 0.5, 2.1);
    run_hover(&mut world);
    assert!(hovered(&world, widgets.top));
    assert!(!hovered(&world, widgets.bottom));
    // Not on the current screen
    assert!(!hovered(&world, widgets.stale));

    set_cursor(&mut world, 0.5, -2.1);
    run_hover(&mut world);
    assert!(!hovered(&world, widgets.top));
    assert!(hovered(&world, widgets.bottom));
}

#[test]
fn test_overlay_ends_hover_of_covered_screen() {
    let (mut world, widgets) = make_world();
    set_cursor(&mut world, 0.5, 2.1);
    run_hover(&mut world);
    assert!(hovered(&world, widgets.top));

    world
        .resource_mut::<GameRenderer>()
        .set_current_screen(ScreenKind::Options);
    run_hover(&mut world);
    assert!(!hovered(&world, widgets.top));

    set_cursor(&mut world, 9.0, 9.0);
    run_hover(&mut world);
    assert!(!hovered(&world, widgets.top));
}

#[test]
fn test_tab_walks_selectable_widgets_in_order() {
    let (mut world, widgets) = make_world();

    tab(&mut world);
    assert_eq!(world.resource::<GuiFocus>().tabbed, Some(widgets.top));
    assert!(hovered(&world, widgets.top));

    tab(&mut world);
    assert_eq!(world.resource::<GuiFocus>().tabbed, Some(widgets.bottom));
    assert!(!hovered(&world, widgets.top));
    assert!(!hovered(&world, widgets.label));
    assert!(hovered(&world, widgets.bottom));

    tab(&mut world);
    assert_eq!(world.resource::<GuiFocus>().tabbed, None);
    assert!(!hovered(&world, widgets.bottom));

    tab(&mut world);
    assert_eq!(world.resource::<GuiFocus>().tabbed, Some(widgets.top));
}

#[test]
fn test_tabbed_widget_keeps_hover_when_cursor_leaves() {
    let (mut world, widgets) = make_world();
    tab(&mut world);

    set_cursor(&mut world, 9.0, 9.0);
    run_hover(&mut world);

    assert!(hovered(&world, widgets.top));
}

#[test]
fn test_tab_key_and_enter_click_tabbed_widget() {
    let (mut world, widgets) = make_world();

    key(&mut world, KEY_ENTER, 0, KeyAction::Release);
    assert!(world.resource::<Clicks>().0.is_empty());

    key(&mut world, KEY_TAB, 0, KeyAction::Press);
    assert_eq!(world.resource::<GuiFocus>().tabbed, Some(widgets.top));

    key(&mut world, KEY_ENTER, 0, KeyAction::Press);
    key(&mut world, KEY_ENTER, 0, KeyAction::Release);
    key(&mut world, KEY_ENTER, MOD_ALT, KeyAction::Release);

    let clicks = &world.resource::<Clicks>().0;
    assert_eq!(
        clicks,
        &vec![
            (widgets.top, MOUSE_BUTTON_1, MOD_TAB_ACTION, KeyAction::Release),
            (
                widgets.top,
                MOUSE_BUTTON_2,
                MOD_ALT | MOD_TAB_ACTION,
                KeyAction::Release
            ),
        ]
    );
}

#[test]
fn test_mouse_clicks_widget_under_cursor() {
    let (mut world, widgets) = make_world();
    set_cursor(&mut world, -1.0, -2.0);

    world.trigger(MouseInputEvent {
        button: MOUSE_BUTTON_1,
        modifiers: 0,
        action: KeyAction::Release,
    });
    world.flush();

    let clicks = &world.resource::<Clicks>().0;
    assert_eq!(
        clicks,
        &vec![(widgets.bottom, MOUSE_BUTTON_1, 0, KeyAction::Release)]
    );
}

#[test]
fn test_mouse_outside_widgets_clicks_nothing() {
    let (mut world, _) = make_world();
    set_cursor(&mut world, 0.0, 6.0);

    world.trigger(MouseInputEvent {
        button: MOUSE_BUTTON_1,
        modifiers: 0,
        action: KeyAction::Press,
    });
    world.flush();

    assert!(world.resource::<Clicks>().0.is_empty());
}
