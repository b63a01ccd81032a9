// types.rs - Shared math and color types for the scene, animation and puzzle modules
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE MATH TYPES
// ============================================================================

/// 3D vector with SIMD-ready alignment
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(skip)]
    _padding: f32, // For SIMD alignment
}

static_assertions::assert_eq_size!(Vec3, [f32; 4]);

/// Position snapshot in world space. The live camera position is the only
/// mutable instance; everything else holds copies.
pub type Position3 = Vec3;

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, _padding: 0.0 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Componentwise `self + (other - self) * t`, with `t` clamped to [0, 1]
    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        Vec3::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    #[inline]
    pub fn normalize(self) -> Vec3 {
        let len_sq = self.length_squared();
        if len_sq > 1e-20 {
            let inv_len = 1.0 / len_sq.sqrt();
            Vec3::new(self.x * inv_len, self.y * inv_len, self.z * inv_len)
        } else {
            Vec3::zero()
        }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn mul_elem(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    #[inline]
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[inline]
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Rotate by intrinsic Euler angles applied in X, Y, Z order (radians)
    pub fn rotate_euler_xyz(self, euler: Vec3) -> Vec3 {
        let (sx, cx) = euler.x.sin_cos();
        let (sy, cy) = euler.y.sin_cos();
        let (sz, cz) = euler.z.sin_cos();

        // R = Rx * Ry * Rz
        let v = self;
        let v = Vec3::new(v.x * cz - v.y * sz, v.x * sz + v.y * cz, v.z);
        let v = Vec3::new(v.x * cy + v.z * sy, v.y, -v.x * sy + v.z * cy);
        Vec3::new(v.x, v.y * cx - v.z * sx, v.y * sx + v.z * cx)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Vec3) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, scalar: f32) -> Vec3 {
        Vec3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, scalar: f32) -> Vec3 {
        let inv = 1.0 / scalar;
        Vec3::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline]
    fn from(v: Vec3) -> [f32; 3] {
        [v.x, v.y, v.z]
    }
}

// ============================================================================
// COLOR TYPE
// ============================================================================

/// RGBA color, components in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// CSS `purple`
    pub const PURPLE: Color = Color::from_hex(0x800080);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from a `0xRRGGBB` literal
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// Back to `0xRRGGBB`, alpha dropped
    #[inline]
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from(arr: [f32; 4]) -> Self {
        Color::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(c: Color) -> [f32; 4] {
        [c.r, c.g, c.b, c.a]
    }
}

// ============================================================================
// UTILITY FUNCTIONS
// ============================================================================

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_on_palette_values() {
        for hex in [0xcc0000, 0x00aaaa, 0x333333, 0x888888] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(1.0, -2.0, 3.0);
        let b = Vec3::new(-4.0, 5.0, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, -1.0), a);
        let mid = a.lerp(b, 0.5);
        assert!((mid.x + 1.5).abs() < 1e-6);
        assert!((mid.y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_quarter_turn_about_x() {
        let v = Vec3::new(0.0, 1.0, 0.0).rotate_euler_xyz(Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0));
        assert!(v.x.abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
        assert!((v.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_serialized_vec3_has_no_padding_field() {
        let json = serde_json::to_string(&Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"z":3.0}"#);
    }
}
