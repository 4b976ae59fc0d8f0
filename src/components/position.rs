//! World-space position component.
//!
//! Positions live in the game's normalized coordinate space: the visible area
//! spans `[-10, 10]` vertically and `[-10·r, 10·r]` horizontally, `r` being the
//! window aspect ratio. GUI layout code works in the unscaled `[-10, 10]` range
//! and multiplies x by `r` when drawing.
//!
//! A [`Position`] is either mutable (moved in place by controllers) or
//! immutable (fixed at spawn, e.g. static labels).

use bevy_ecs::prelude::Component;

/// Plain 2D coordinate value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by delta.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

/// Position (pivot) of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub enum Position {
    Mutable(Point2D),
    Immutable(Point2D),
}

impl Default for Position {
    fn default() -> Self {
        Position::Mutable(Point2D::ZERO)
    }
}

impl Position {
    /// Mutable position at (x, y).
    pub fn new(x: f32, y: f32) -> Self {
        Position::Mutable(Point2D::new(x, y))
    }

    /// Position that never changes after construction.
    pub fn fixed(x: f32, y: f32) -> Self {
        Position::Immutable(Point2D::new(x, y))
    }

    pub fn point(&self) -> Point2D {
        match self {
            Position::Mutable(p) | Position::Immutable(p) => *p,
        }
    }

    pub fn x(&self) -> f32 {
        self.point().x
    }

    pub fn y(&self) -> f32 {
        self.point().y
    }

    pub fn is_mutable(&self) -> bool {
        matches!(self, Position::Mutable(_))
    }

    /// Access the point for in-place updates. `None` for immutable positions.
    pub fn as_mutable(&mut self) -> Option<&mut Point2D> {
        match self {
            Position::Mutable(p) => Some(p),
            Position::Immutable(_) => None,
        }
    }

    /// Translate a mutable position. Returns `false` (and leaves the position
    /// untouched) when it is immutable.
    pub fn translate(&mut self, dx: f32, dy: f32) -> bool {
        match self.as_mutable() {
            Some(p) => {
                p.translate(dx, dy);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_default_is_mutable_origin() {
        let pos = Position::default();
        assert!(pos.is_mutable());
        assert!(approx_eq(pos.x(), 0.0));
        assert!(approx_eq(pos.y(), 0.0));
    }

    #[test]
    fn test_mutable_translates() {
        let mut pos = Position::new(1.0, 2.0);
        assert!(pos.translate(0.5, -1.0));
        assert!(approx_eq(pos.x(), 1.5));
        assert!(approx_eq(pos.y(), 1.0));
    }

    #[test]
    fn test_immutable_ignores_translate() {
        let mut pos = Position::fixed(3.0, 4.0);
        assert!(!pos.translate(1.0, 1.0));
        assert!(pos.as_mutable().is_none());
        assert_eq!(pos.point(), Point2D::new(3.0, 4.0));
    }

    #[test]
    fn test_as_mutable_allows_direct_write() {
        let mut pos = Position::new(0.0, 0.0);
        if let Some(p) = pos.as_mutable() {
            p.x = 7.0;
        }
        assert!(approx_eq(pos.x(), 7.0));
    }
}
