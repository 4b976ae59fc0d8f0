//! Title screen background: drifting clouds and lightning strikes.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::namespacedkey::NamespacedKey;

pub const CLOUD_COUNT: usize = 20;
pub const CLOUD_VARIANTS: usize = 10;
pub const CLOUD_SCALE: f32 = 0.01;
/// Drift speed in units per second.
pub const CLOUD_SPEED: f32 = 0.25;
pub const FAST_CLOUD_FACTOR: f32 = 1.75;
pub const BOLT_SCALE: f32 = 0.05;
/// Vertical offset of a strike below its cloud.
pub const BOLT_DROP: f32 = 1.5;

pub fn cloud_texture(variant: usize) -> NamespacedKey {
    NamespacedKey::default_ns(&format!("textures/clouds/moody/Cloud_{}", variant))
}

pub fn bolt_texture() -> NamespacedKey {
    NamespacedKey::default_ns("textures/clouds/bolt")
}

pub fn background_texture() -> NamespacedKey {
    NamespacedKey::default_ns("textures/backgrounds/title")
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Cloud {
    /// Units per second to the right.
    pub speed: f32,
}

impl Cloud {
    /// Odd clouds drift faster.
    pub fn nth(index: usize) -> Self {
        let factor = if index % 2 != 0 { FAST_CLOUD_FACTOR } else { 1.0 };
        Self {
            speed: CLOUD_SPEED * factor,
        }
    }
}

/// One segment of a strike: offset from the strike origin and rotation in
/// degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoltSegment {
    pub dx: f32,
    pub dy: f32,
    pub rotation: f32,
}

#[derive(Component, Clone, Debug)]
pub struct LightningStrike {
    pub segments: SmallVec<[BoltSegment; 8]>,
    /// Seconds left before the strike disappears.
    pub ttl: f32,
}

impl LightningStrike {
    /// Random strike with up to `max_branches` branches of up to `max_steps`
    /// segments each, every segment turning by up to `max_turn` degrees.
    pub fn random(rng: &mut fastrand::Rng, max_branches: u32, max_steps: u32, max_turn: f32, ttl: f32) -> Self {
        let branches = rng.u32(1..=max_branches.max(1));
        let steps = rng.u32(1..=max_steps.max(1));
        let mut segments = SmallVec::new();
        for _ in 0..branches {
            let (mut dx, mut dy, mut rotation) = (0.0_f32, 0.0_f32, 0.0_f32);
            for _ in 0..steps {
                rotation += (rng.f32() * 2.0 - 1.0) * max_turn;
                segments.push(BoltSegment { dx, dy, rotation });
                dx += rotation.to_radians().sin() * 0.5;
                dy -= rotation.to_radians().cos() * 0.5;
            }
        }
        Self { segments, ttl }
    }

    /// Age the strike. True once it has expired.
    pub fn age(&mut self, dt: f32) -> bool {
        self.ttl -= dt;
        self.ttl <= 0.0
    }
}

/// Countdown to the next lightning strike on the title screen.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct StormTimer {
    pub remaining: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_clouds_are_faster() {
        assert!(Cloud::nth(1).speed > Cloud::nth(0).speed);
        assert!((Cloud::nth(3).speed - 0.4375).abs() < 1e-6);
    }

    #[test]
    fn test_cloud_texture_key() {
        assert_eq!(cloud_texture(7).to_string(), "ro:textures/clouds/moody/Cloud_7");
    }

    #[test]
    fn test_random_strike_shape() {
        let mut rng = fastrand::Rng::with_seed(7);
        let strike = LightningStrike::random(&mut rng, 3, 4, 30.0, 0.5);
        assert!(!strike.segments.is_empty());
        assert!(strike.segments.len() <= 12);
        assert!(strike.segments.iter().all(|s| s.rotation.abs() <= 120.0));
        // every branch starts at the strike origin
        assert_eq!(strike.segments[0].dx, 0.0);
        assert_eq!(strike.segments[0].dy, 0.0);
    }

    #[test]
    fn test_strike_expires() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut strike = LightningStrike::random(&mut rng, 1, 1, 10.0, 0.3);
        assert!(!strike.age(0.2));
        assert!(strike.age(0.2));
    }
}
