//! ECS resources made available to systems.
//!
//! Overview
//! - `assetmanager` / `assetprovider` – asset lookup, texture and shader caches
//! - `debugmode` – debug overlay toggle and frame statistics
//! - `dungeon` – seed and player of the current dungeon
//! - `fullscreen` – presence marks fullscreen mode
//! - `gameconfig` – settings from `config.ini`
//! - `guifocus` – widget reached by the tab walk
//! - `input` – keybindings and per-frame key/mouse state
//! - `renderer` – screens, camera and projection matrices
//! - `shaderstore` / `texturestore` – loaded GPU programs and textures
//! - `systemsstore` – registry of screen enter systems by name
//! - `worldtime` – simulation time and delta
pub mod assetmanager;
pub mod assetprovider;
pub mod debugmode;
pub mod dungeon;
pub mod fullscreen;
pub mod gameconfig;
pub mod guifocus;
pub mod input;
pub mod renderer;
pub mod shaderstore;
pub mod systemsstore;
pub mod texturestore;
pub mod worldtime;
