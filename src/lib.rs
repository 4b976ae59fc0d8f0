//! Rogue's Odyssey library.
//!
//! Exposes the game's ECS components, resources, systems and events for the
//! integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod namespacedkey;
pub mod resources;
pub mod systems;
