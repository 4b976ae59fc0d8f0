//! Game setup and screen population.
//!
//! [`setup`] runs once before the main loop: it loads the assets every screen
//! needs, resolves the keymap and opens the title screen. The `enter_*`
//! systems are registered in the [`SystemsStore`](crate::resources::systemsstore::SystemsStore)
//! and run by the screen switch observer to spawn the entities of the screen
//! that was just entered. Everything they spawn is tagged with the new
//! screen's [`ScreenOwned`] handle.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::background::background_texture;
use crate::components::boundingbox::BoundingBox;
use crate::components::drawinstance::DrawInstance;
use crate::components::gui::{BUTTON_SCALE, Button, ButtonAction, GuiElement, InputBox};
use crate::components::player::{
    CoordinatesText, Health, Heart, MovementQueue, PLAYER_HEALTH, PLAYER_SCALE, Player,
    PlayerController, heart_layout, heart_scale,
};
use crate::components::position::{Point2D, Position};
use crate::components::screen::{DrawSpace, ScreenKind, ScreenOwned};
use crate::components::sprite::{DrawProperty, Sprite};
use crate::components::text::{DrawStyle, Text, font_atlas_key};
use crate::components::zindex::ZIndex;
use crate::events::screen::SetScreenEvent;
use crate::namespacedkey::NamespacedKey;
use crate::resources::assetmanager::{AssetManager, fatal};
use crate::resources::dungeon::Dungeon;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{GameInputHandler, Keybinding};
use crate::resources::renderer::{Camera, GameRenderer};
use crate::resources::shaderstore::textured_shader_key;
use crate::systems::background::spawn_clouds;
use crate::systems::player::coordinates_markup;

const BACKGROUND_Z: i32 = -10;
const WIDGET_Z: i32 = 10;
const HUD_Z: i32 = 20;
const BUTTON_STEP: f32 = 1.2125;

/// Load shared assets, resolve keybindings and open the title screen.
pub fn setup(
    mut commands: Commands,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut assets: NonSendMut<AssetManager>,
    config: Res<GameConfig>,
) {
    if let Err(err) = assets.shader(&mut rl, &th, textured_shader_key()) {
        fatal(err);
    }
    if let Err(err) = assets.texture(&mut rl, &th, font_atlas_key()) {
        fatal(err);
    }

    let mut input = match GameInputHandler::from_keymap(&assets, &config.keyboard_layout) {
        Ok(input) => input,
        Err(err) => fatal(err),
    };
    for binding in Keybinding::all() {
        input.register(binding);
    }
    commands.insert_resource(input);

    info!("Setup done, opening title screen");
    commands.trigger(SetScreenEvent {
        kind: ScreenKind::Title,
    });
}

/// Current screen handle as an ownership tag, checked against the expected
/// kind.
fn owner_for(renderer: &GameRenderer, kind: ScreenKind) -> Option<ScreenOwned> {
    match renderer.current_screen() {
        Some(handle) if handle.kind == kind => Some(ScreenOwned(handle)),
        other => {
            warn!("Entering {:?} but the current screen is {:?}", kind, other);
            None
        }
    }
}

fn spawn_button(
    commands: &mut Commands,
    owner: ScreenOwned,
    order: usize,
    label: &str,
    y: f32,
    action: Option<ButtonAction>,
) -> Entity {
    let text = Text::new(label, BUTTON_SCALE, DrawStyle::Centered);
    let button = Button::labelled(false, action);
    let bounding_box = button.bounding_box(Some(&text));
    commands
        .spawn((
            GuiElement::selectable(order),
            button,
            text,
            Position::fixed(0.0, y),
            bounding_box,
            ZIndex(WIDGET_Z),
            owner,
        ))
        .id()
}

pub fn enter_title(mut commands: Commands, renderer: Res<GameRenderer>) {
    let Some(owner) = owner_for(&renderer, ScreenKind::Title) else {
        return;
    };

    commands.spawn((
        Sprite::new(background_texture()).with(DrawProperty::Stretch),
        Position::fixed(0.0, 0.0),
        ZIndex(BACKGROUND_Z),
        owner,
    ));
    let mut rng = fastrand::Rng::new();
    spawn_clouds(&mut commands, owner, &mut rng);

    let title = Text::new("<pink bold shadow>Rogue's Odyssey", 1.5, DrawStyle::Centered);
    let title_box = title.bounding_box();
    commands.spawn((
        GuiElement::passive(0),
        title,
        Position::fixed(0.0, 8.5),
        title_box,
        ZIndex(WIDGET_Z),
        owner,
    ));

    let buttons = [
        ("<shadow>New Game", Some(ButtonAction::NewGame)),
        ("<shadow>Continue", None),
        ("<shadow>Options", Some(ButtonAction::Options)),
    ];
    for (i, (label, action)) in buttons.into_iter().enumerate() {
        spawn_button(&mut commands, owner, i + 1, label, 1.0 - BUTTON_STEP * i as f32, action);
    }
}

pub fn enter_options(mut commands: Commands, renderer: Res<GameRenderer>) {
    let Some(owner) = owner_for(&renderer, ScreenKind::Options) else {
        return;
    };

    let lines = [
        ("<yellow bold shadow>Options", 1.0, 6.0),
        ("<light_gray shadow>F1 toggles the debug overlay", 0.5, 3.5),
        ("<light_gray shadow>F11 toggles fullscreen", 0.5, 2.5),
        ("<light_gray shadow>Tab selects, Enter activates", 0.5, 1.5),
    ];
    for (markup, scale, y) in lines {
        let text = Text::new(markup, scale, DrawStyle::Centered);
        let bounding_box = text.bounding_box();
        commands.spawn((
            GuiElement::passive(0),
            text,
            Position::fixed(0.0, y),
            bounding_box,
            ZIndex(WIDGET_Z),
            owner,
        ));
    }

    let input_box = InputBox::new(12.0, 1.2);
    commands.spawn((
        GuiElement::selectable(1),
        input_box,
        Position::fixed(0.0, -0.5),
        input_box.bounding_box(),
        owner,
    ));

    spawn_button(
        &mut commands,
        owner,
        2,
        "<shadow>Back",
        -2.5,
        Some(ButtonAction::BackToTitle),
    );
}

pub fn enter_dungeon(mut commands: Commands, mut renderer: ResMut<GameRenderer>) {
    let Some(owner) = owner_for(&renderer, ScreenKind::Dungeon) else {
        return;
    };
    let mut dungeon = Dungeon::random(&mut fastrand::Rng::new());
    info!("New dungeon with seed {}", dungeon.seed);

    let position = Position::new(0.0, 0.0);
    let player = commands
        .spawn((
            Player,
            PlayerController::default(),
            MovementQueue::default(),
            Health::full(PLAYER_HEALTH),
            Sprite::new(NamespacedKey::default_ns("textures/player/placeholder_player"))
                .with(DrawProperty::Scale(PLAYER_SCALE)),
            DrawInstance::new(),
            position,
            BoundingBox::rectangle(1.0, 2.5),
            DrawSpace::Camera,
            owner,
        ))
        .id();
    dungeon.player = Some(player);
    commands.insert_resource(dungeon);
    renderer.set_camera(Some(Camera::attached(owner.0, player, Point2D::ZERO)));

    commands.spawn((
        CoordinatesText,
        Text::new(&coordinates_markup(&position), 0.5, DrawStyle::Absolute),
        Position::fixed(7.0, 9.5),
        ZIndex(HUD_Z),
        owner,
    ));

    for (index, slot) in heart_layout(PLAYER_HEALTH, PLAYER_HEALTH).into_iter().enumerate() {
        commands.spawn((
            Heart { index },
            Sprite::new(slot.kind.texture()).with(DrawProperty::Scale(heart_scale())),
            Position::fixed(slot.x, slot.y),
            ZIndex(HUD_Z),
            owner,
        ));
    }
}
