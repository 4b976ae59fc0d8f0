//! Player entity components and the hearts HUD layout.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::components::position::Point2D;
use crate::namespacedkey::NamespacedKey;

/// Horizontal speed in units per second.
pub const PLAYER_SPEED: f32 = 10.0;
pub const JUMP_HEIGHT: f32 = 1.25;
pub const PLAYER_SCALE: f32 = 0.1;
pub const PLAYER_HEALTH: u32 = 6;

const HEART_SCALE: f32 = 0.05;
const HEART_ORIGIN: (f32, f32) = (-9.5, 9.5);
const HEART_STEP: f32 = 0.4;
const HEARTS_PER_ROW: usize = 10;
const HEART_ROW_STEP: f32 = 1.0;
const HEALTH_PER_HEART: u32 = 2;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Keyboard controller state.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerController {
    /// Cleared by a jump, set again when the jump key is released.
    pub jump_armed: bool,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self { jump_armed: true }
    }
}

/// Movements requested this frame, applied by the movement system.
#[derive(Component, Clone, Debug, Default)]
pub struct MovementQueue(pub SmallVec<[Point2D; 4]>);

impl MovementQueue {
    pub fn push(&mut self, dx: f32, dy: f32) {
        self.0.push(Point2D::new(dx, dy));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// The text showing the player's coordinates.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CoordinatesText;

/// One heart of the HUD, by index from the top left.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heart {
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeartKind {
    Full,
    Half,
    Empty,
}

impl HeartKind {
    pub fn texture(&self) -> NamespacedKey {
        NamespacedKey::default_ns(match self {
            HeartKind::Full => "textures/gui/full_heart",
            HeartKind::Half => "textures/gui/half_heart",
            HeartKind::Empty => "textures/gui/empty_heart",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartSlot {
    pub x: f32,
    pub y: f32,
    pub kind: HeartKind,
}

pub fn heart_scale() -> f32 {
    HEART_SCALE
}

/// Hearts for `health` out of `max`, two health points per heart, rows of
/// ten growing downwards.
pub fn heart_layout(health: u32, max: u32) -> Vec<HeartSlot> {
    let hearts = max.div_ceil(HEALTH_PER_HEART) as usize;
    (0..hearts)
        .map(|i| {
            let floor = i as u32 * HEALTH_PER_HEART;
            let kind = if health >= floor + HEALTH_PER_HEART {
                HeartKind::Full
            } else if health > floor {
                HeartKind::Half
            } else {
                HeartKind::Empty
            };
            HeartSlot {
                x: HEART_ORIGIN.0 + (i % HEARTS_PER_ROW) as f32 * HEART_STEP,
                y: HEART_ORIGIN.1 - (i / HEARTS_PER_ROW) as f32 * HEART_ROW_STEP,
                kind,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_full_health_draws_full_hearts() {
        let hearts = heart_layout(6, 6);
        assert_eq!(hearts.len(), 3);
        assert!(hearts.iter().all(|h| h.kind == HeartKind::Full));
        assert!(approx_eq(hearts[0].x, -9.5));
        assert!(approx_eq(hearts[2].x, -8.7));
        assert!(hearts.iter().all(|h| approx_eq(h.y, 9.5)));
    }

    #[test]
    fn test_odd_health_draws_half_heart() {
        let kinds: Vec<_> = heart_layout(3, 6).iter().map(|h| h.kind).collect();
        assert_eq!(kinds, vec![HeartKind::Full, HeartKind::Half, HeartKind::Empty]);
    }

    #[test]
    fn test_eleventh_heart_starts_second_row() {
        let hearts = heart_layout(22, 22);
        assert_eq!(hearts.len(), 11);
        assert!(approx_eq(hearts[9].x, -9.5 + 9.0 * 0.4));
        assert!(approx_eq(hearts[10].x, -9.5));
        assert!(approx_eq(hearts[10].y, 8.5));
    }

    #[test]
    fn test_zero_max_has_no_hearts() {
        assert!(heart_layout(0, 0).is_empty());
    }

    #[test]
    fn test_movement_queue() {
        let mut queue = MovementQueue::default();
        assert!(queue.is_empty());
        queue.push(1.0, 0.0);
        assert_eq!(queue.0.len(), 1);
    }
}
