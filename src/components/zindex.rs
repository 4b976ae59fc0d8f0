//! Draw order within a layer.
//!
//! Within one screen and draw space, entities are drawn by ascending
//! [`ZIndex`]. Entities without one draw at 0.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
