// scene/camera.rs - Perspective camera looking at a point

use serde::{Deserialize, Serialize};

use super::Ray;
use crate::animation::PositionSink;
use crate::types::{Position3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Position3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::zero(),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    pub fn with_position(mut self, position: Position3) -> Self {
        self.position = position;
        self
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Unit view direction; falls back to -Z when position and look-at coincide
    pub fn forward(&self) -> Vec3 {
        let forward = (self.look_at - self.position).normalize();
        if forward == Vec3::zero() {
            Vec3::new(0.0, 0.0, -1.0)
        } else {
            forward
        }
    }

    /// (right, up) basis of the image plane
    fn basis(&self) -> (Vec3, Vec3) {
        let forward = self.forward();
        let mut right = forward.cross(self.up).normalize();
        if right == Vec3::zero() {
            // Looking straight along `up`
            right = forward.cross(Vec3::new(0.0, 0.0, -1.0)).normalize();
        }
        (right, right.cross(forward))
    }

    /// Ray through normalized device coordinates (x right, y up, both in [-1, 1])
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let forward = self.forward();
        let (right, up) = self.basis();
        let tan_half = (self.fov.to_radians() * 0.5).tan();
        let direction = forward
            + right * (ndc_x * tan_half * self.aspect)
            + up * (ndc_y * tan_half);
        Ray {
            origin: self.position,
            direction: direction.normalize(),
        }
    }

    /// World point → NDC, `None` when behind the camera
    pub fn project(&self, point: Vec3) -> Option<(f32, f32)> {
        let forward = self.forward();
        let (right, up) = self.basis();
        let rel = point - self.position;
        let depth = rel.dot(forward);
        if depth <= 1e-6 {
            return None;
        }
        let tan_half = (self.fov.to_radians() * 0.5).tan();
        Some((
            rel.dot(right) / (depth * tan_half * self.aspect),
            rel.dot(up) / (depth * tan_half),
        ))
    }
}

impl PositionSink for PerspectiveCamera {
    fn position(&self) -> Position3 {
        self.position
    }

    fn set_position(&mut self, position: Position3) {
        self.position = position;
    }
}

/// Client pixel coordinates → NDC for a viewport of `width`×`height`
pub fn client_to_ndc(client_x: f32, client_y: f32, width: u32, height: u32) -> (f32, f32) {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    ((client_x / w) * 2.0 - 1.0, -(client_y / h) * 2.0 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_ndc_corners() {
        assert_eq!(client_to_ndc(0.0, 0.0, 800, 600), (-1.0, 1.0));
        assert_eq!(client_to_ndc(800.0, 600.0, 800, 600), (1.0, -1.0));
        assert_eq!(client_to_ndc(400.0, 300.0, 800, 600), (0.0, 0.0));
    }

    #[test]
    fn test_center_ray_points_at_look_target() {
        let mut camera = PerspectiveCamera::new(30.0, 1.0, 0.1, 100.0).with_position(Vec3::new(0.0, 1.0, 3.0));
        camera.look_at = Vec3::zero();
        let ray = camera.ray_from_ndc(0.0, 0.0);
        let expected = Vec3::new(0.0, -1.0, -3.0).normalize();
        assert!((ray.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_project_inverts_ray() {
        let mut camera = PerspectiveCamera::new(45.0, 16.0 / 9.0, 0.1, 100.0).with_position(Vec3::new(2.0, 3.0, 6.0));
        camera.look_at = Vec3::zero();
        let ray = camera.ray_from_ndc(0.3, -0.4);
        let point = ray.origin + ray.direction * 5.0;
        let (x, y) = camera.project(point).unwrap();
        assert!((x - 0.3).abs() < 1e-4);
        assert!((y + 0.4).abs() < 1e-4);
    }

    #[test]
    fn test_set_aspect_ignores_zero_height() {
        let mut camera = PerspectiveCamera::new(30.0, 1.0, 0.1, 100.0);
        camera.set_aspect(1920, 0);
        assert_eq!(camera.aspect, 1.0);
        camera.set_aspect(1920, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
