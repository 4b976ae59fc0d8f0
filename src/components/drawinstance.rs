//! Per-entity animation state for animated textures.
//!
//! Animated textures are shared through the texture store; each entity that
//! draws one owns a [`DrawInstance`] tracking which frame it is on. An
//! instance that is never ticked keeps showing the same frame.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawInstance {
    pub current_frame: u32,
    /// Seconds accumulated towards the next frame.
    pub elapsed: f32,
}

impl DrawInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Whole frames are consumed from the accumulated
    /// time and the frame index wraps around `total_frames`.
    pub fn tick(&mut self, dt: f32, frame_duration: f32, total_frames: u32) {
        if total_frames == 0 || frame_duration <= 0.0 {
            return;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed < frame_duration {
            return;
        }
        let advance = (self.elapsed / frame_duration).floor();
        self.elapsed -= advance * frame_duration;
        let step = (advance as u64 % total_frames as u64) as u32;
        self.current_frame = (self.current_frame % total_frames + step) % total_frames;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_instance_stays_on_first_frame() {
        let instance = DrawInstance::new();
        assert_eq!(instance.current_frame, 0);
    }

    #[test]
    fn test_tick_below_frame_duration_keeps_frame() {
        let mut instance = DrawInstance::new();
        instance.tick(0.05, 0.1, 3);
        assert_eq!(instance.current_frame, 0);
        instance.tick(0.06, 0.1, 3);
        assert_eq!(instance.current_frame, 1);
    }

    #[test]
    fn test_whole_cycle_wraps_to_start() {
        // 3 frames of 0.1s: 0.35s advances three frames and wraps back to 0
        let mut instance = DrawInstance::new();
        instance.tick(0.35, 0.1, 3);
        assert_eq!(instance.current_frame, 0);
        assert!(instance.elapsed >= 0.0 && instance.elapsed < 0.1);
    }

    #[test]
    fn test_frame_always_in_range() {
        let mut instance = DrawInstance::new();
        let ticks = [0.35, 0.0, 0.01, 1.7, 0.099, 12.5, 1000.0, 0.35, 0.35];
        for dt in ticks {
            instance.tick(dt, 0.1, 3);
            assert!(instance.current_frame < 3);
            assert!(instance.elapsed >= 0.0);
        }
    }

    #[test]
    fn test_zero_duration_never_advances() {
        let mut instance = DrawInstance::new();
        instance.tick(5.0, 0.0, 4);
        assert_eq!(instance.current_frame, 0);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut instance = DrawInstance::new();
        instance.tick(-1.0, 0.1, 3);
        assert_eq!(instance, DrawInstance::new());
    }
}
