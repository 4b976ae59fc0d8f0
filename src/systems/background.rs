//! Title screen background systems.
//!
//! Clouds drift right and wrap back to the left edge once they leave the
//! visible area. A storm timer spawns short lived lightning strikes under a
//! random cloud.
use bevy_ecs::prelude::*;
use fastrand::Rng;

use crate::components::background::{
    CLOUD_COUNT, CLOUD_SCALE, CLOUD_VARIANTS, Cloud, LightningStrike, StormTimer,
    cloud_texture,
};
use crate::components::boundingbox::BoundingBox;
use crate::components::drawinstance::DrawInstance;
use crate::components::position::Position;
use crate::components::screen::ScreenOwned;
use crate::components::sprite::{DrawProperty, Sprite};
use crate::components::zindex::ZIndex;
use crate::resources::assetmanager::AssetManager;
use crate::resources::renderer::GameRenderer;
use crate::resources::worldtime::WorldTime;

const CLOUD_START_X: f32 = -9.5;
const CLOUD_BASE_Y: f32 = 7.5;
const STRIKE_TTL: f32 = 0.4;
const STRIKE_MAX_BRANCHES: u32 = 3;
const STRIKE_MAX_STEPS: u32 = 5;
const STRIKE_MAX_TURN: f32 = 35.0;
const STORM_MIN_WAIT: f32 = 1.5;
const STORM_MAX_WAIT: f32 = 5.0;
pub const CLOUD_Z: i32 = 1;
pub const STRIKE_Z: i32 = 0;

fn jitter(rng: &mut Rng) -> f32 {
    if rng.bool() { rng.f32() } else { -rng.f32() }
}

/// Spawn the cloud layer for a screen.
pub fn spawn_clouds(commands: &mut Commands, owner: ScreenOwned, rng: &mut Rng) {
    let mut x = CLOUD_START_X;
    for i in 0..CLOUD_COUNT {
        x += 1.0 + jitter(rng);
        let y = CLOUD_BASE_Y + if rng.bool() { -1.25 } else { 1.75 };
        commands.spawn((
            Cloud::nth(i),
            Position::new(x, y),
            Sprite::new(cloud_texture(i % CLOUD_VARIANTS + 1)).with(DrawProperty::Scale(CLOUD_SCALE)),
            ZIndex(CLOUD_Z),
            owner,
        ));
    }
    commands.spawn((
        StormTimer {
            remaining: STORM_MIN_WAIT,
        },
        owner,
    ));
}

/// Cloud box in layout units, once its texture is known.
fn cloud_box(assets: &AssetManager, sprite: &Sprite) -> Option<BoundingBox> {
    let (w, h) = assets.texture_layout(sprite.texture)?.pixel_size();
    Some(BoundingBox::rectangle(w / 2.0 * CLOUD_SCALE, h / 2.0 * CLOUD_SCALE))
}

pub fn drift_clouds(
    time: Res<WorldTime>,
    renderer: Res<GameRenderer>,
    assets: NonSend<AssetManager>,
    mut rng: Local<Rng>,
    mut clouds: Query<(&Cloud, &mut Position, &Sprite, &ScreenOwned)>,
) {
    for (cloud, mut position, sprite, owner) in clouds.iter_mut() {
        if !renderer.is_drawn(owner.0) {
            continue;
        }
        position.translate(cloud.speed * time.delta, 0.0);

        let Some(bounding_box) = cloud_box(&assets, sprite) else {
            continue;
        };
        let visible = bounding_box.is_screen_visible(
            renderer.layout_x(position.x()),
            position.y(),
            renderer.projection(),
        );
        if !visible {
            let x = CLOUD_START_X + 0.5 + jitter(&mut rng);
            let y = CLOUD_BASE_Y + if rng.bool() { -0.75 } else { 1.0 };
            *position = Position::new(x, y);
        }
    }
}

/// Count down storm timers, spawning a strike under a random cloud of the
/// same screen, and despawn strikes that have expired.
pub fn storm(
    time: Res<WorldTime>,
    mut rng: Local<Rng>,
    mut timers: Query<(&mut StormTimer, &ScreenOwned)>,
    clouds: Query<(&Position, &ScreenOwned), With<Cloud>>,
    mut strikes: Query<(Entity, &mut LightningStrike)>,
    mut commands: Commands,
) {
    for (mut timer, owner) in timers.iter_mut() {
        timer.remaining -= time.delta;
        if timer.remaining > 0.0 {
            continue;
        }
        timer.remaining = STORM_MIN_WAIT + rng.f32() * (STORM_MAX_WAIT - STORM_MIN_WAIT);

        let candidates: Vec<&Position> = clouds
            .iter()
            .filter(|(_, cloud_owner)| cloud_owner.0 == owner.0)
            .map(|(position, _)| position)
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let cloud = candidates[rng.usize(..candidates.len())];
        commands.spawn((
            LightningStrike::random(
                &mut rng,
                STRIKE_MAX_BRANCHES,
                STRIKE_MAX_STEPS,
                STRIKE_MAX_TURN,
                STRIKE_TTL,
            ),
            Position::fixed(cloud.x(), cloud.y()),
            DrawInstance::new(),
            ZIndex(STRIKE_Z),
            *owner,
        ));
    }

    for (entity, mut strike) in strikes.iter_mut() {
        if strike.age(time.delta) {
            commands.entity(entity).despawn();
        }
    }
}
