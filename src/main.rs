//! Rogue's Odyssey entry point.
//!
//! A small 2D game client built on:
//! - **raylib** for windowing, input and GPU drawing
//! - **bevy_ecs** for entities, resources, systems and observers
//!
//! # Main Loop
//!
//! 1. Parse the command line and load `config.ini`
//! 2. Open the window and build the ECS world and its resources
//! 3. Register screen enter systems and observers
//! 4. Run `setup`, which loads shared assets and opens the title screen
//! 5. Each frame: poll input, run game systems, render
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --assets . --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod namespacedkey;
mod resources;
mod systems;

use crate::components::screen::ScreenKind;
use crate::events::screen::set_screen_observer;
use crate::events::switchdebug::switch_debug_observer;
use crate::events::switchfullscreen::{SwitchFullScreenEvent, switch_fullscreen_observer};
use crate::resources::assetmanager::AssetManager;
use crate::resources::assetprovider::DirectoryAssetProvider;
use crate::resources::debugmode::FrameStats;
use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use crate::resources::guifocus::GuiFocus;
use crate::resources::input::GameInputHandler;
use crate::resources::renderer::GameRenderer;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::background::{drift_clouds, storm};
use crate::systems::debugoverlay::frame_stats_system;
use crate::systems::gui::{
    button_action_observer, gui_hover_observer, gui_hover_system, gui_keyboard_observer,
    gui_mouse_observer, tabulate_observer,
};
use crate::systems::input::{global_keys_observer, poll_input};
use crate::systems::player::{
    apply_movement, camera_follow, player_controller, player_escape_observer,
    update_coordinates_text, update_hearts,
};
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;
use crate::systems::window::window_resize_system;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

/// Rogue's Odyssey
#[derive(Parser)]
#[command(version, about = "Rogue's Odyssey, a small 2D dungeon game.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory containing the `assets/` tree. Overrides the config file.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Write the configuration, with the last windowed size, back on exit.
    #[arg(long)]
    save_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Configuration ---------------
    let mut config = match cli.config.clone() {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        info!("{}, using defaults", e);
    }
    if let Some(root) = cli.assets.clone() {
        config.asset_root = root;
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Rogue's Odyssey");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    if config.target_fps > 0 {
        rl.set_target_fps(config.target_fps);
    }
    // Escape belongs to the game
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(GameRenderer::new(
        rl.get_screen_width() as f32,
        rl.get_screen_height() as f32,
    ));
    world.insert_resource(GameInputHandler::default());
    world.insert_resource(GuiFocus::default());
    world.insert_resource(FrameStats::new());
    let start_fullscreen = config.fullscreen;
    info!("Asset root: {:?}", config.asset_root);
    world.insert_non_send_resource(AssetManager::new(DirectoryAssetProvider::new(
        config.asset_root.clone(),
    )));
    world.insert_resource(config);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    // Screen enter systems
    let mut systems_store = SystemsStore::new();
    let enter_systems = [
        (ScreenKind::Title, world.register_system(game::enter_title)),
        (ScreenKind::Options, world.register_system(game::enter_options)),
        (ScreenKind::Dungeon, world.register_system(game::enter_dungeon)),
    ];
    for (kind, id) in enter_systems {
        systems_store.insert(kind.enter_system(), id);
    }
    world.insert_resource(systems_store);

    world.add_observer(set_screen_observer);
    world.add_observer(switch_debug_observer);
    world.add_observer(switch_fullscreen_observer);
    world.add_observer(global_keys_observer);
    world.add_observer(gui_hover_observer);
    world.add_observer(gui_mouse_observer);
    world.add_observer(gui_keyboard_observer);
    world.add_observer(tabulate_observer);
    world.add_observer(button_action_observer);
    world.add_observer(player_escape_observer);
    // Ensure the observers are registered before anything triggers events.
    world.flush();

    let setup_id = world.register_system(game::setup);
    if let Err(e) = world.run_system(setup_id) {
        error!("Setup failed: {:?}", e);
        return;
    }
    if start_fullscreen {
        world.trigger(SwitchFullScreenEvent {});
    }

    let mut update = Schedule::default();
    update.add_systems(window_resize_system);
    update.add_systems(poll_input.after(window_resize_system));
    update.add_systems(gui_hover_system.after(poll_input));
    update.add_systems(player_controller.after(poll_input));
    update.add_systems(apply_movement.after(player_controller));
    update.add_systems(camera_follow.after(apply_movement));
    update.add_systems(update_coordinates_text.after(apply_movement));
    update.add_systems(update_hearts);
    update.add_systems(drift_clouds);
    update.add_systems(storm);
    update.add_systems(animation);
    update.add_systems(frame_stats_system);
    update.add_systems(
        render_system
            .after(camera_follow)
            .after(update_coordinates_text)
            .after(update_hearts)
            .after(drift_clouds)
            .after(storm)
            .after(animation)
            .after(gui_hover_system)
            .after(frame_stats_system),
    );

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {:?}", e);
        return;
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }

    if cli.save_config {
        let (width, height) = world.resource::<GameRenderer>().window_size();
        let windowed = !world.contains_resource::<FullScreen>();
        let mut config = world.resource_mut::<GameConfig>();
        if windowed {
            config.set_window_size(width as u32, height as u32);
        }
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
        }
    }
    info!("Goodbye");
}
