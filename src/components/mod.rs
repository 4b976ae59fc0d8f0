//! ECS components for entities.
//!
//! Submodules overview:
//! - [`background`] – title screen clouds and lightning strikes
//! - [`boundingbox`] – axis-aligned boxes for hit tests and culling
//! - [`drawinstance`] – per-entity animation frame state
//! - [`gui`] – widgets: buttons, input boxes, tab order
//! - [`player`] – player state and the hearts HUD layout
//! - [`position`] – 2D positions, mutable or fixed
//! - [`screen`] – screen ownership and draw spaces
//! - [`sprite`] – textured sprites and draw properties
//! - [`text`] / [`textcomponent`] – bitmap font text and its markup
//! - [`zindex`] – draw order inside a layer

pub mod background;
pub mod boundingbox;
pub mod drawinstance;
pub mod gui;
pub mod player;
pub mod position;
pub mod screen;
pub mod sprite;
pub mod text;
pub mod textcomponent;
pub mod zindex;
