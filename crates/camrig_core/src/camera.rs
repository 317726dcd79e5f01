//! Camera handle abstraction
//!
//! Controllers never own the rendering camera. They read it and, at the end
//! of the frame, write to it through [`CameraHandle`]. [`OrthoCamera`] is a
//! plain-data implementation for hosts that keep their own camera struct and
//! for tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Coordinate space used when reading or writing a camera pose
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Space {
    /// World coordinates
    #[default]
    World,
    /// Coordinates relative to the camera's parent frame
    Local,
}

/// Read/write access to an orthographic rendering camera
pub trait CameraHandle {
    /// Camera position in `space`
    fn position(&self, space: Space) -> Vec2;

    /// Move the camera
    fn set_position(&mut self, space: Space, position: Vec2);

    /// Rotation about the view axis in degrees
    fn rotation(&self, space: Space) -> f32;

    /// Set the rotation in degrees
    fn set_rotation(&mut self, space: Space, degrees: f32);

    /// Orthographic half-height
    fn half_height(&self) -> f32;

    /// Set the orthographic half-height
    fn set_half_height(&mut self, half_height: f32);

    /// Viewport width divided by height
    fn aspect(&self) -> f32;

    /// Project a screen-space pixel position into world space
    fn screen_to_world(&self, screen: Vec2) -> Vec2;

    /// Convert a world point into `space`
    fn world_to_space(&self, point: Vec2, space: Space) -> Vec2 {
        let _ = space;
        point
    }
}

/// Parent transform of a camera, used for [`Space::Local`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentFrame {
    /// Parent origin in world space
    pub origin: Vec2,
    /// Parent rotation in degrees
    pub rotation: f32,
}

impl ParentFrame {
    fn to_local(&self, world: Vec2) -> Vec2 {
        Vec2::from_angle(-self.rotation.to_radians()).rotate(world - self.origin)
    }

    fn to_world(&self, local: Vec2) -> Vec2 {
        self.origin + Vec2::from_angle(self.rotation.to_radians()).rotate(local)
    }
}

/// Orthographic camera described by plain data
///
/// Screen coordinates are pixels with the origin at the bottom-left corner
/// of the viewport and y pointing up.
#[derive(Clone, Debug, PartialEq)]
pub struct OrthoCamera {
    /// World position of the view center
    pub position: Vec2,
    /// World rotation in degrees
    pub rotation: f32,
    /// Orthographic half-height
    pub half_height: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// Optional parent frame for local-space access
    pub parent: Option<ParentFrame>,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            half_height: 5.0,
            viewport: Vec2::new(1280.0, 720.0),
            parent: None,
        }
    }
}

impl OrthoCamera {
    /// Create a camera at `position` with the given half-height and viewport
    pub fn new(position: Vec2, half_height: f32, viewport: Vec2) -> Self {
        Self {
            position,
            half_height,
            viewport,
            ..Self::default()
        }
    }

    /// Attach a parent frame (builder pattern)
    pub fn with_parent(mut self, parent: ParentFrame) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_height * self.aspect(), self.half_height)
    }

    /// Project a world point into viewport coordinates (0..1 on both axes when visible)
    pub fn world_to_viewport(&self, point: Vec2) -> Vec2 {
        let offset = Vec2::from_angle(-self.rotation.to_radians()).rotate(point - self.position);
        let half = self.half_extents();
        if half.x == 0.0 || half.y == 0.0 {
            return Vec2::splat(0.5);
        }
        offset / half * 0.5 + Vec2::splat(0.5)
    }

    /// Check whether a world point is strictly inside the view
    pub fn point_in_view(&self, point: Vec2) -> bool {
        let viewport = self.world_to_viewport(point);
        viewport.x > 0.0 && viewport.x < 1.0 && viewport.y > 0.0 && viewport.y < 1.0
    }
}

impl CameraHandle for OrthoCamera {
    fn position(&self, space: Space) -> Vec2 {
        match (space, &self.parent) {
            (Space::Local, Some(parent)) => parent.to_local(self.position),
            _ => self.position,
        }
    }

    fn set_position(&mut self, space: Space, position: Vec2) {
        self.position = match (space, &self.parent) {
            (Space::Local, Some(parent)) => parent.to_world(position),
            _ => position,
        };
    }

    fn rotation(&self, space: Space) -> f32 {
        match (space, &self.parent) {
            (Space::Local, Some(parent)) => self.rotation - parent.rotation,
            _ => self.rotation,
        }
    }

    fn set_rotation(&mut self, space: Space, degrees: f32) {
        self.rotation = match (space, &self.parent) {
            (Space::Local, Some(parent)) => degrees + parent.rotation,
            _ => degrees,
        };
    }

    fn half_height(&self) -> f32 {
        self.half_height
    }

    fn set_half_height(&mut self, half_height: f32) {
        self.half_height = half_height;
    }

    fn aspect(&self) -> f32 {
        if self.viewport.y <= 0.0 {
            return 1.0;
        }
        self.viewport.x / self.viewport.y
    }

    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return self.position;
        }
        let ndc = screen / self.viewport * 2.0 - Vec2::ONE;
        let offset = ndc * self.half_extents();
        self.position + Vec2::from_angle(self.rotation.to_radians()).rotate(offset)
    }

    fn world_to_space(&self, point: Vec2, space: Space) -> Vec2 {
        match (space, &self.parent) {
            (Space::Local, Some(parent)) => parent.to_local(point),
            _ => point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_screen_to_world_center_and_corner() {
        let camera = OrthoCamera::new(Vec2::new(3.0, 4.0), 2.0, Vec2::new(200.0, 100.0));
        assert!(approx(camera.screen_to_world(Vec2::new(100.0, 50.0)), Vec2::new(3.0, 4.0)));
        // aspect 2, half extents (4, 2)
        assert!(approx(camera.screen_to_world(Vec2::new(200.0, 100.0)), Vec2::new(7.0, 6.0)));
        assert!(approx(camera.screen_to_world(Vec2::ZERO), Vec2::new(-1.0, 2.0)));
    }

    #[test]
    fn test_viewport_round_trip() {
        let mut camera = OrthoCamera::new(Vec2::new(1.0, -1.0), 3.0, Vec2::new(160.0, 90.0));
        camera.rotation = 30.0;
        let world = camera.screen_to_world(Vec2::new(40.0, 70.0));
        let viewport = camera.world_to_viewport(world);
        assert!(approx(viewport, Vec2::new(0.25, 70.0 / 90.0)));
        assert!(camera.point_in_view(world));
        assert!(!camera.point_in_view(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_local_space_through_parent() {
        let mut camera = OrthoCamera::default().with_parent(ParentFrame {
            origin: Vec2::new(10.0, 0.0),
            rotation: 90.0,
        });
        camera.set_position(Space::Local, Vec2::new(1.0, 0.0));
        assert!(approx(camera.position(Space::World), Vec2::new(10.0, 1.0)));
        assert!(approx(camera.position(Space::Local), Vec2::new(1.0, 0.0)));

        camera.set_rotation(Space::Local, 15.0);
        assert!((camera.rotation(Space::World) - 105.0).abs() < 1e-4);
        assert!((camera.rotation(Space::Local) - 15.0).abs() < 1e-4);
    }
}
