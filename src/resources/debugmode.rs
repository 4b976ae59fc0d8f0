//! Debug overlay state.
//!
//! The presence of [`DebugMode`] turns the overlay on. [`FrameStats`]
//! accumulates frame and render times all the time and rebuilds the overlay
//! texts once per second.

use bevy_ecs::prelude::Resource;

use crate::components::text::{DrawStyle, Text};
use crate::components::textcomponent::composed;

const REFRESH_INTERVAL: f32 = 1.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Marker resource: when present, the render system draws the overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}

/// Physical and virtual memory of the process, in bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemoryUsage {
    pub physical: usize,
    pub virtual_mem: usize,
}

#[derive(Resource, Clone, Debug)]
pub struct FrameStats {
    window: f32,
    frames: u32,
    frame_time: f32,
    render_time: f32,
    fps_text: Text,
    timing_text: Text,
    memory_text: Text,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            window: 0.0,
            frames: 0,
            frame_time: 0.0,
            render_time: 0.0,
            fps_text: Text::new(&fps_markup(0), 0.5, DrawStyle::Absolute),
            timing_text: Text::new(&timing_markup(0.0, 0.0), 0.5, DrawStyle::Absolute),
            memory_text: Text::new(&memory_markup(None), 0.37, DrawStyle::Absolute),
        }
    }

    /// Start a fresh one second window.
    pub fn reset(&mut self) {
        self.window = 0.0;
        self.frames = 0;
        self.frame_time = 0.0;
        self.render_time = 0.0;
    }

    /// Count one frame of `dt` seconds. True when a second has passed and
    /// [`FrameStats::refresh`] is due.
    pub fn record_frame(&mut self, dt: f32) -> bool {
        self.frames += 1;
        self.frame_time += dt;
        self.window += dt;
        self.window >= REFRESH_INTERVAL
    }

    pub fn record_render(&mut self, seconds: f32) {
        self.render_time += seconds;
    }

    /// Rebuild the overlay texts from the current window, then reset it.
    /// `memory` is `None` when the platform query failed; the previous
    /// reading stays on screen.
    pub fn refresh(&mut self, memory: Option<MemoryUsage>) {
        if self.frames > 0 && self.window > 0.0 {
            let fps = (self.frames as f32 / self.window).round() as u32;
            let frame_ms = self.frame_time / self.frames as f32 * 1000.0;
            let render_ms = self.render_time / self.frames as f32 * 1000.0;
            self.fps_text.set_markup(&fps_markup(fps));
            self.timing_text.set_markup(&timing_markup(frame_ms, render_ms));
        }
        if memory.is_some() {
            self.memory_text.set_markup(&memory_markup(memory));
        }
        self.reset();
    }

    /// Overlay texts with their layout positions.
    pub fn overlay(&self) -> [(f32, f32, &Text); 3] {
        [
            (-9.5, 9.5, &self.fps_text),
            (-9.5, 8.0, &self.timing_text),
            (-9.5, 7.0, &self.memory_text),
        ]
    }
}

fn fps_markup(fps: u32) -> String {
    composed("<cyan shadow>{} FPS", &[&fps])
}

fn timing_markup(frame_ms: f32, render_ms: f32) -> String {
    composed(
        "<light_gray shadow>Frame: {} ms, render: {} ms",
        &[&format!("{:.2}", frame_ms), &format!("{:.2}", render_ms)],
    )
}

fn memory_markup(memory: Option<MemoryUsage>) -> String {
    match memory {
        Some(memory) => composed(
            "<light_gray shadow>Memory: {} MB physical, {} MB virtual",
            &[
                &format!("{:.1}", memory.physical as f64 / BYTES_PER_MB),
                &format!("{:.1}", memory.virtual_mem as f64 / BYTES_PER_MB),
            ],
        ),
        None => "<light_gray shadow>Memory: n/a".to_string(),
    }
}
