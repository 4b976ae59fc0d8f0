//! Game systems.
//!
//! Submodules overview
//! - [`animation`] – advance animated sprites
//! - [`background`] – drifting clouds and lightning on the title screen
//! - [`debugoverlay`] – frame statistics for the overlay
//! - [`gui`] – hover, click and tab dispatch for widgets
//! - [`input`] – read hardware input, global hotkeys
//! - [`player`] – player controller, movement, camera and HUD
//! - [`render`] – draw the drawn screens and the overlay
//! - [`time`] – update simulation time
//! - [`window`] – forward window resizes to the renderer

pub mod animation;
pub mod background;
pub mod debugoverlay;
pub mod gui;
pub mod input;
pub mod player;
pub mod render;
pub mod time;
pub mod window;
