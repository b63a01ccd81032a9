// scene/controls.rs - Damped orbit controller around a focus target

use std::f32::consts::{PI, TAU};

use super::PerspectiveCamera;
use crate::types::Vec3;

/// Damping factor the viewer scenes use
pub const DEFAULT_DAMPING_FACTOR: f32 = 0.2;

const EPS: f32 = 1e-6;

/// Orbit controller: accumulates rotate/dolly input and applies it on `update`.
///
/// `update` is idempotent when no input is pending: it only re-aims the camera
/// at the target and leaves the position alone, so a camera flight can own
/// the position while the controls keep the orientation.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_damping(mut self, damping_factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = damping_factor.clamp(0.0, 1.0);
        self
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Horizontal drag of `dx` pixels on a viewport `height` pixels tall
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, height: u32) {
        let h = height.max(1) as f32;
        self.delta_theta -= TAU * dx / h * self.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Positive `delta_y` zooms out
    pub fn dolly(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(delta_y.abs() / 100.0);
        if delta_y > 0.0 {
            self.scale /= step;
        } else if delta_y < 0.0 {
            self.scale *= step;
        }
    }

    pub fn has_pending_motion(&self) -> bool {
        self.delta_theta.abs() > EPS || self.delta_phi.abs() > EPS || (self.scale - 1.0).abs() > EPS
    }

    /// Apply pending input to the camera. Returns true if the position moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        camera.look_at = self.target;

        if !self.has_pending_motion() {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.scale = 1.0;
            return false;
        }

        let offset = camera.position - self.target;
        let radius = offset.length();
        let (theta, phi) = if radius > EPS {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        let (step_theta, step_phi) = if self.enable_damping {
            (self.delta_theta * self.damping_factor, self.delta_phi * self.damping_factor)
        } else {
            (self.delta_theta, self.delta_phi)
        };

        let theta = theta + step_theta;
        let phi = (phi + step_phi).clamp(EPS, PI - EPS);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        camera.position = self.target
            + Vec3::new(radius * sin_phi * sin_theta, radius * cos_phi, radius * sin_phi * cos_theta);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
        true
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::zero())
    }
}
