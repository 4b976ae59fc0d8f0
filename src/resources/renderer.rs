//! Renderer state: screens, camera and matrices.
//!
//! The [`GameRenderer`] resource decides what is drawn and how world units map
//! to the window:
//!
//! - **Screens**: one current screen, plus at most one overlaid screen that
//!   keeps drawing underneath when the current one is an overlay.
//! - **Projection**: `ortho(±10·r, ±10)` with `r` the window aspect ratio;
//!   GUI, HUD and backgrounds are drawn with it.
//! - **Render matrix**: projection through the current camera, if any. With a
//!   field of view `f` the visible half height is `10 / tan(f / 2)`, and the
//!   view translates by the camera position (x scaled by `r`).
//!
//! All world x coordinates are multiplied by `r` before projection, so layout
//! code can think in a fixed `[-10, 10]` box.

use bevy_ecs::prelude::*;
use glam::{Mat4, Vec3, Vec4};
use log::debug;
use raylib::prelude::Rectangle;
use smallvec::SmallVec;

use crate::components::position::Point2D;
use crate::components::screen::{DrawSpace, ScreenHandle, ScreenKind};

/// Half height of the visible area at the default zoom.
pub const VIEW_HALF_HEIGHT: f32 = 10.0;
/// Field of view of entity-attached cameras, in degrees.
pub const ATTACHED_CAMERA_FOV: f32 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraTarget {
    Free,
    Entity(Entity),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub target: CameraTarget,
    /// Degrees. Zero or less keeps the default zoom.
    pub fov: f32,
    pub position: Point2D,
    pub owner: ScreenHandle,
}

impl Camera {
    pub fn free(owner: ScreenHandle, position: Point2D) -> Self {
        Self {
            target: CameraTarget::Free,
            fov: 0.0,
            position,
            owner,
        }
    }

    pub fn attached(owner: ScreenHandle, entity: Entity, position: Point2D) -> Self {
        Self {
            target: CameraTarget::Entity(entity),
            fov: ATTACHED_CAMERA_FOV,
            position,
            owner,
        }
    }

    /// Visible half height through this camera.
    pub fn half_height(&self) -> f32 {
        if self.fov <= 0.0 {
            VIEW_HALF_HEIGHT
        } else {
            VIEW_HALF_HEIGHT / (self.fov.to_radians() / 2.0).tan()
        }
    }
}

/// Outcome of [`GameRenderer::set_current_screen`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenTransition {
    pub entered: ScreenHandle,
    /// Screens no longer drawn; their entities must go.
    pub discarded: SmallVec<[ScreenHandle; 2]>,
    pub overlaying: bool,
}

#[derive(Resource, Clone, Debug)]
pub struct GameRenderer {
    width: f32,
    height: f32,
    projection: Mat4,
    view: Mat4,
    render: Mat4,
    current: Option<ScreenHandle>,
    overlaid: Option<ScreenHandle>,
    should_overlay: bool,
    camera: Option<Camera>,
    next_screen_id: u32,
}

impl GameRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        let projection = Mat4::orthographic_rh_gl(-10.0, 10.0, -10.0, 10.0, -1.0, 1.0);
        Self {
            width,
            height,
            projection,
            view: Mat4::IDENTITY,
            render: projection,
            current: None,
            overlaid: None,
            should_overlay: false,
            camera: None,
            next_screen_id: 0,
        }
    }

    pub fn current_screen(&self) -> Option<ScreenHandle> {
        self.current
    }

    pub fn overlaid_screen(&self) -> Option<ScreenHandle> {
        self.overlaid
    }

    pub fn should_overlay(&self) -> bool {
        self.should_overlay
    }

    pub fn is_current(&self, handle: ScreenHandle) -> bool {
        self.current == Some(handle)
    }

    pub fn is_drawn(&self, handle: ScreenHandle) -> bool {
        self.is_current(handle) || (self.should_overlay && self.overlaid == Some(handle))
    }

    /// Screens in drawing order: overlaid first, then current.
    pub fn drawn_screens(&self) -> SmallVec<[ScreenHandle; 2]> {
        let mut screens = SmallVec::new();
        if self.should_overlay {
            screens.extend(self.overlaid);
        }
        screens.extend(self.current);
        screens
    }

    /// Switch to a new instance of `kind`.
    pub fn set_current_screen(&mut self, kind: ScreenKind) -> ScreenTransition {
        let entered = ScreenHandle {
            kind,
            id: self.next_screen_id,
        };
        self.next_screen_id = self.next_screen_id.wrapping_add(1);

        let overlaying = kind.is_overlay() && self.current.is_some();
        let mut discarded = SmallVec::new();
        if overlaying {
            discarded.extend(self.overlaid.take());
            self.overlaid = self.current.take();
        } else {
            discarded.extend(self.overlaid.take());
            discarded.extend(self.current.take());
        }
        self.should_overlay = overlaying;
        self.current = Some(entered);

        if self.camera.is_some_and(|c| discarded.contains(&c.owner)) {
            self.camera = None;
        }
        self.recalculate_matrices();
        debug!("Screen {:?} entered, discarded {:?}", entered, discarded);

        ScreenTransition {
            entered,
            discarded,
            overlaying,
        }
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
        self.recalculate_matrices();
    }

    /// Camera moved. Only the current screen's camera triggers a recalculation.
    pub fn camera_changed(&mut self, position: Point2D) -> bool {
        let current = self.current;
        match self.camera.as_mut() {
            Some(camera) if Some(camera.owner) == current => {
                camera.position = position;
                self.recalculate_matrices();
                true
            }
            _ => false,
        }
    }

    pub fn window_resized(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.recalculate_matrices();
    }

    pub fn window_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }

    pub fn recalculate_matrices(&mut self) {
        let r = self.aspect_ratio();
        self.projection = Mat4::orthographic_rh_gl(
            -VIEW_HALF_HEIGHT * r,
            VIEW_HALF_HEIGHT * r,
            -VIEW_HALF_HEIGHT,
            VIEW_HALF_HEIGHT,
            -1.0,
            1.0,
        );
        let camera = self.camera.filter(|c| self.is_drawn(c.owner));
        match camera {
            Some(camera) => {
                let s = camera.half_height();
                let camera_projection = Mat4::orthographic_rh_gl(-s * r, s * r, -s, s, -1.0, 1.0);
                self.view = Mat4::from_translation(Vec3::new(-camera.position.x * r, -camera.position.y, 0.0));
                self.render = camera_projection * self.view;
            }
            None => {
                self.view = Mat4::IDENTITY;
                self.render = self.projection;
            }
        }
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn render_matrix(&self) -> &Mat4 {
        &self.render
    }

    pub fn matrix_for(&self, space: DrawSpace) -> &Mat4 {
        match space {
            DrawSpace::Projection => &self.projection,
            DrawSpace::Camera => &self.render,
        }
    }

    /// Horizontal layout coordinate scaled to the window shape.
    pub fn layout_x(&self, x: f32) -> f32 {
        x * self.aspect_ratio()
    }

    /// Half size of the area covered by the projection.
    pub fn view_half_extents(&self) -> (f32, f32) {
        (VIEW_HALF_HEIGHT * self.aspect_ratio(), VIEW_HALF_HEIGHT)
    }

    /// Window pixel coordinates to world units under the projection.
    pub fn cursor_to_world(&self, mouse_x: f32, mouse_y: f32) -> Point2D {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Point2D::ZERO;
        }
        let ndc = Vec4::new(2.0 * mouse_x / self.width - 1.0, 1.0 - 2.0 * mouse_y / self.height, 0.0, 1.0);
        let world = self.projection.inverse() * ndc;
        Point2D::new(world.x / world.w, world.y / world.w)
    }

    /// World point to window pixels through `matrix`.
    pub fn to_screen(&self, matrix: &Mat4, x: f32, y: f32) -> (f32, f32) {
        let ndc = matrix.project_point3(Vec3::new(x, y, 0.0));
        ((ndc.x + 1.0) * 0.5 * self.width, (1.0 - ndc.y) * 0.5 * self.height)
    }

    /// Destination rectangle of a quad: position is the quad centre in
    /// pixels, size its full pixel extent.
    pub fn screen_rect(&self, matrix: &Mat4, x: f32, y: f32, half_width: f32, half_height: f32) -> Rectangle {
        let (cx, cy) = self.to_screen(matrix, x, y);
        let (ex, ey) = self.to_screen(matrix, x + half_width, y + half_height);
        Rectangle::new(cx, cy, (ex - cx).abs() * 2.0, (ey - cy).abs() * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_initial_projection_is_square() {
        let renderer = GameRenderer::new(800.0, 600.0);
        let corner = renderer.projection().project_point3(Vec3::new(10.0, 10.0, 0.0));
        assert!(approx_eq(corner.x, 1.0));
        assert!(approx_eq(corner.y, 1.0));
        assert!(renderer.current_screen().is_none());
    }

    #[test]
    fn test_resize_follows_aspect_ratio() {
        let mut renderer = GameRenderer::new(800.0, 600.0);
        renderer.window_resized(1600.0, 800.0);
        assert!(approx_eq(renderer.aspect_ratio(), 2.0));
        let edge = renderer.projection().project_point3(Vec3::new(20.0, -10.0, 0.0));
        assert!(approx_eq(edge.x, 1.0));
        assert!(approx_eq(edge.y, -1.0));
        assert!(approx_eq(renderer.layout_x(-9.5), -19.0));
        assert_eq!(renderer.view_half_extents(), (20.0, 10.0));
    }

    #[test]
    fn test_non_overlay_discards_previous() {
        let mut renderer = GameRenderer::new(800.0, 600.0);
        let title = renderer.set_current_screen(ScreenKind::Title);
        assert!(title.discarded.is_empty());
        assert!(!title.overlaying);

        let dungeon = renderer.set_current_screen(ScreenKind::Dungeon);
        assert_eq!(dungeon.discarded.as_slice(), &[title.entered]);
        assert!(renderer.is_current(dungeon.entered));
        assert!(renderer.overlaid_screen().is_none());
    }

    #[test]
    fn test_overlay_keeps_previous_drawing() {
        let mut renderer = GameRenderer::new(800.0, 600.0);
        let title = renderer.set_current_screen(ScreenKind::Title).entered;
        let options = renderer.set_current_screen(ScreenKind::Options);
        assert!(options.overlaying);
        assert!(options.discarded.is_empty());
        assert!(renderer.should_overlay());
        assert_eq!(renderer.drawn_screens().as_slice(), &[title, options.entered]);

        // leaving the overlay drops both
        let back = renderer.set_current_screen(ScreenKind::Title);
        assert_eq!(back.discarded.len(), 2);
        assert!(back.discarded.contains(&title));
        assert!(back.discarded.contains(&options.entered));
        assert_eq!(renderer.drawn_screens().as_slice(), &[back.entered]);
    }

    #[test]
    fn test_overlay_without_current_is_not_overlaying() {
        let mut renderer = GameRenderer::new(800.0, 600.0);
        let options = renderer.set_current_screen(ScreenKind::Options);
        assert!(!options.overlaying);
        assert!(!renderer.should_overlay());
    }

    #[test]
    fn test_overlay_does_not_stack() {
        let mut renderer = GameRenderer::new(800.0, 600.0);
        let title = renderer.set_current_screen(ScreenKind::Title).entered;
        let first = renderer.set_current_screen(ScreenKind::Options).entered;
        let second = renderer.set_current_screen(ScreenKind::Options);
        assert_eq!(second.discarded.as_slice(), &[title]);
        assert_eq!(renderer.overlaid_screen(), Some(first));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut renderer = GameRenderer::new(800.0, 600.0);
        let a = renderer.set_current_screen(ScreenKind::Title).entered;
        let b = renderer.set_current_screen(ScreenKind::Title).entered;
        assert_ne!(a, b);
    }

    #[test]
    fn test_camera_matrix_follows_position() {
        let mut renderer = GameRenderer::new(1000.0, 500.0);
        renderer.window_resized(1000.0, 500.0);
        let dungeon = renderer.set_current_screen(ScreenKind::Dungeon).entered;
        let player = World::new().spawn_empty().id();
        renderer.set_camera(Some(Camera::attached(dungeon, player, Point2D::new(1.0, 2.0))));

        // the camera position lands on the centre of the screen
        let (px, py) = renderer.to_screen(renderer.render_matrix(), 1.0 * 2.0, 2.0);
        assert!(approx_eq(px, 500.0));
        assert!(approx_eq(py, 250.0));

        assert!(renderer.camera_changed(Point2D::new(3.0, 2.0)));
        let (px, _) = renderer.to_screen(renderer.render_matrix(), 6.0, 2.0);
        assert!(approx_eq(px, 500.0));
        // the projection layer does not move
        let (px, _) = renderer.to_screen(renderer.projection(), 0.0, 0.0);
        assert!(approx_eq(px, 500.0));
    }

    #[test]
    fn test_fov_scales_visible_area() {
        let camera = Camera::free(
            ScreenHandle {
                kind: ScreenKind::Dungeon,
                id: 0,
            },
            Point2D::ZERO,
        );
        assert!(approx_eq(camera.half_height(), 10.0));
        let mut wide = camera;
        wide.fov = 90.0;
        assert!(approx_eq(wide.half_height(), 10.0));
        wide.fov = 60.0;
        assert!(approx_eq(wide.half_height(), 10.0 / (30f32).to_radians().tan()));
    }

    #[test]
    fn test_camera_dropped_with_its_screen() {
        let mut renderer = GameRenderer::new(800.0, 600.0);
        let dungeon = renderer.set_current_screen(ScreenKind::Dungeon).entered;
        renderer.set_camera(Some(Camera::free(dungeon, Point2D::new(5.0, 0.0))));
        renderer.set_current_screen(ScreenKind::Title);
        assert!(renderer.camera().is_none());
        assert_eq!(renderer.render_matrix(), renderer.projection());
        assert!(!renderer.camera_changed(Point2D::ZERO));
    }

    #[test]
    fn test_cursor_to_world_inverts_projection() {
        let mut renderer = GameRenderer::new(800.0, 600.0);
        renderer.window_resized(800.0, 600.0);
        let centre = renderer.cursor_to_world(400.0, 300.0);
        assert!(approx_eq(centre.x, 0.0));
        assert!(approx_eq(centre.y, 0.0));
        let top_left = renderer.cursor_to_world(0.0, 0.0);
        assert!(approx_eq(top_left.x, -10.0 * 800.0 / 600.0));
        assert!(approx_eq(top_left.y, 10.0));
    }

    #[test]
    fn test_screen_rect_is_centred_quad() {
        let mut renderer = GameRenderer::new(800.0, 800.0);
        renderer.window_resized(800.0, 800.0);
        let rect = renderer.screen_rect(renderer.projection(), 0.0, 0.0, 1.0, 2.0);
        assert!(approx_eq(rect.x, 400.0));
        assert!(approx_eq(rect.y, 400.0));
        assert!(approx_eq(rect.width, 80.0));
        assert!(approx_eq(rect.height, 160.0));
    }
}
