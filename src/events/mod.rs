//! Event types and observers.
//!
//! Submodules:
//! - [`gui`] – hover, click and tab events for widgets
//! - [`input`] – raw keyboard and mouse events
//! - [`screen`] – switch the current screen
//! - [`switchdebug`] – toggle the debug overlay
//! - [`switchfullscreen`] – toggle fullscreen
pub mod gui;
pub mod input;
pub mod screen;
pub mod switchdebug;
pub mod switchfullscreen;
