//! Animation system.
//!
//! Advances every [`DrawInstance`] whose sprite texture is animated. The
//! frame strip layout comes from the texture cache, so an instance starts
//! ticking once its texture has been drawn for the first time.
//!
//! Lightning strikes carry their own instance and are ticked the same way.

use bevy_ecs::prelude::*;

use crate::components::background::{LightningStrike, bolt_texture};
use crate::components::drawinstance::DrawInstance;
use crate::components::sprite::Sprite;
use crate::resources::assetmanager::AssetManager;
use crate::resources::worldtime::WorldTime;

pub fn animation(
    mut sprites: Query<(&Sprite, &mut DrawInstance), Without<LightningStrike>>,
    mut strikes: Query<&mut DrawInstance, With<LightningStrike>>,
    assets: NonSend<AssetManager>,
    time: Res<WorldTime>,
) {
    for (sprite, mut instance) in sprites.iter_mut() {
        let Some(layout) = assets.texture_layout(sprite.texture) else {
            continue;
        };
        if let Some(animation) = layout.animation() {
            instance.tick(time.delta, animation.frame_duration(), animation.total_frames());
        }
    }

    let Some(bolt) = assets.texture_layout(bolt_texture()) else {
        return;
    };
    if let Some(animation) = bolt.animation() {
        for mut instance in strikes.iter_mut() {
            instance.tick(time.delta, animation.frame_duration(), animation.total_frames());
        }
    }
}
