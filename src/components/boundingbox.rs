//! Axis-aligned bounding box relative to an owner's origin.
//!
//! Boxes are stored as four edges around the owner's pivot. The factory
//! methods [`BoundingBox::rectangle`] and [`BoundingBox::square`] build
//! symmetric boxes from half extents, which is how every box in the game is
//! created; [`BoundingBox::new`] takes raw edges and does not validate them.

use bevy_ecs::prelude::Component;
use glam::{Mat4, Vec4};

/// Slack applied on every edge by [`BoundingBox::contains_point`].
pub const CONTAINS_TOLERANCE: f32 = 0.01;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub left_x: f32,
    pub right_x: f32,
    pub top_y: f32,
    pub bottom_y: f32,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        left_x: 0.0,
        right_x: 0.0,
        top_y: 0.0,
        bottom_y: 0.0,
    };

    pub fn new(left_x: f32, right_x: f32, top_y: f32, bottom_y: f32) -> Self {
        Self {
            left_x,
            right_x,
            top_y,
            bottom_y,
        }
    }

    /// Symmetric box with horizontal half extent `lr` and vertical half extent `tb`.
    pub fn rectangle(lr: f32, tb: f32) -> Self {
        Self::new(-lr, lr, tb, -tb)
    }

    pub fn square(radius: f32) -> Self {
        Self::rectangle(radius, radius)
    }

    pub fn width(&self) -> f32 {
        self.right_x - self.left_x
    }

    pub fn height(&self) -> f32 {
        self.top_y - self.bottom_y
    }

    /// Point containment with the box translated to `(origin_x, origin_y)`.
    pub fn contains_point(&self, origin_x: f32, origin_y: f32, point_x: f32, point_y: f32) -> bool {
        point_x >= origin_x + self.left_x - CONTAINS_TOLERANCE
            && point_x <= origin_x + self.right_x + CONTAINS_TOLERANCE
            && point_y >= origin_y + self.bottom_y - CONTAINS_TOLERANCE
            && point_y <= origin_y + self.top_y + CONTAINS_TOLERANCE
    }

    /// Inclusive overlap test against another box at a different origin.
    pub fn intercepts(&self, origin: (f32, f32), other: &BoundingBox, other_origin: (f32, f32)) -> bool {
        let (x, y) = origin;
        let (ox, oy) = other_origin;
        x + self.left_x <= ox + other.right_x
            && x + self.right_x >= ox + other.left_x
            && y + self.bottom_y <= oy + other.top_y
            && y + self.top_y >= oy + other.bottom_y
    }

    pub fn mul_all(&self, factor: f32) -> Self {
        self.mul_lr(factor).mul_tb(factor)
    }

    pub fn mul_lr(&self, factor: f32) -> Self {
        Self {
            left_x: self.left_x * factor,
            right_x: self.right_x * factor,
            ..*self
        }
    }

    pub fn mul_tb(&self, factor: f32) -> Self {
        Self {
            top_y: self.top_y * factor,
            bottom_y: self.bottom_y * factor,
            ..*self
        }
    }

    /// Visibility of the box translated to `(x, y)` under `matrix`.
    ///
    /// The four corners are projected into NDC (with perspective divide) and
    /// the box counts as visible when the projected rectangle overlaps the
    /// `[-1, 1]` square.
    pub fn is_screen_visible(&self, x: f32, y: f32, matrix: &Mat4) -> bool {
        let corners = [
            (self.left_x, self.top_y),
            (self.right_x, self.top_y),
            (self.right_x, self.bottom_y),
            (self.left_x, self.bottom_y),
        ];
        let mut min = (f32::INFINITY, f32::INFINITY);
        let mut max = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for (cx, cy) in corners {
            let clip = *matrix * Vec4::new(x + cx, y + cy, 0.0, 1.0);
            if clip.w.abs() <= f32::EPSILON {
                continue;
            }
            let (nx, ny) = (clip.x / clip.w, clip.y / clip.w);
            min = (min.0.min(nx), min.1.min(ny));
            max = (max.0.max(nx), max.1.max(ny));
        }
        min.0 <= 1.0 && max.0 >= -1.0 && min.1 <= 1.0 && max.1 >= -1.0
    }
}
