//! Simulation clock.
//!
//! The main loop feeds raylib's frame time into [`WorldTime::advance`] once
//! per frame; systems read the scaled `delta`.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldTime {
    /// Scaled seconds since start.
    pub elapsed: f32,
    /// Scaled seconds of the current frame.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Start a new frame of `dt` unscaled seconds.
    pub fn advance(&mut self, dt: f32) {
        let scaled = dt.max(0.0) * self.time_scale;
        self.elapsed += scaled;
        self.delta = scaled;
        self.frame_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_applies_time_scale() {
        let mut time = WorldTime::default().with_time_scale(0.5);
        time.advance(0.2);
        time.advance(0.2);
        assert!((time.delta - 0.1).abs() < 1e-6);
        assert!((time.elapsed - 0.2).abs() < 1e-6);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut time = WorldTime::default();
        time.advance(-1.0);
        assert_eq!(time.delta, 0.0);
    }
}
