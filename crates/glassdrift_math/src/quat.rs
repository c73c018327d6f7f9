//! Quaternion for representing rotations in 3D space
//!
//! A unit quaternion `q = (w, x, y, z)` encodes a rotation by angle θ around
//! a unit axis `n` as `w = cos(θ/2)`, `(x, y, z) = n * sin(θ/2)`.
//! `q` and `-q` describe the same rotation.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Quaternion with scalar part `w` and vector part `(x, y, z)`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    #[inline]
    pub const fn from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation by `angle` radians around `axis`
    ///
    /// The axis is expected to be unit length.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Rotation from Euler angles applied in X, then Y, then Z order
    ///
    /// Intrinsic `XYZ` convention, equal to `qx * qy * qz`.
    pub fn from_euler_xyz(x: f32, y: f32, z: f32) -> Self {
        let (s1, c1) = (x * 0.5).sin_cos();
        let (s2, c2) = (y * 0.5).sin_cos();
        let (s3, c3) = (z * 0.5).sin_cos();

        Self {
            x: s1 * c2 * c3 + c1 * s2 * s3,
            y: c1 * s2 * c3 - s1 * c2 * s3,
            z: c1 * c2 * s3 + s1 * s2 * c3,
            w: c1 * c2 * c3 - s1 * s2 * s3,
        }
    }

    /// The vector part `(x, y, z)`
    #[inline]
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Four-component dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length
    ///
    /// Degenerate (zero or non-finite) quaternions become the identity.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            let inv = 1.0 / len;
            Self {
                x: self.x * inv,
                y: self.y * inv,
                z: self.z * inv,
                w: self.w * inv,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Conjugate: negates the vector part
    ///
    /// For unit quaternions this is the inverse rotation.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Multiplicative inverse (conjugate divided by squared length)
    pub fn inverse(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > 0.0 {
            let c = self.conjugate();
            let inv = 1.0 / len_sq;
            Self {
                x: c.x * inv,
                y: c.y * inv,
                z: c.z * inv,
                w: c.w * inv,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Hamilton product: result = self * other
    ///
    /// The composed rotation applies `other` first, then `self`.
    pub fn mul_quat(&self, other: &Self) -> Self {
        let a = self;
        let b = other;
        Self {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }

    /// Rotate a vector: v' = q * v * q⁻¹ (for unit q)
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = self.xyz();
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Angular distance to another orientation in radians, in `[0, π]`
    pub fn angle_to(&self, other: &Self) -> f32 {
        let d = self.normalize().dot(&other.normalize()).abs().min(1.0);
        2.0 * d.acos()
    }

    /// True when every component is finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Convert to a 3x3 rotation matrix in column-major order
    pub fn to_matrix3(&self) -> [[f32; 3]; 3] {
        let x_col = self.rotate(Vec3::X);
        let y_col = self.rotate(Vec3::Y);
        let z_col = self.rotate(Vec3::Z);
        [x_col.to_array(), y_col.to_array(), z_col.to_array()]
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.mul_quat(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Quat::IDENTITY.rotate(v), v));
    }

    #[test]
    fn test_z_rotation_90() {
        let q = Quat::from_axis_angle(Vec3::Z, PI / 2.0);
        let rotated = q.rotate(Vec3::X);
        assert!(vec_approx_eq(rotated, Vec3::Y), "Expected Y, got {:?}", rotated);
    }

    #[test]
    fn test_x_rotation_90() {
        let q = Quat::from_axis_angle(Vec3::X, PI / 2.0);
        let rotated = q.rotate(Vec3::Y);
        assert!(vec_approx_eq(rotated, Vec3::Z), "Expected Z, got {:?}", rotated);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalized(), 1.23);
        let v = Vec3::new(1.0, -2.0, 3.0);
        assert!(approx_eq(q.rotate(v).length(), v.length()));
    }

    #[test]
    fn test_compose_applies_right_first() {
        let rx = Quat::from_axis_angle(Vec3::X, PI / 2.0);
        let rz = Quat::from_axis_angle(Vec3::Z, PI / 2.0);
        // Y -> (X by 90) -> Z -> (Z by 90) -> Z
        let composed = rz * rx;
        assert!(vec_approx_eq(composed.rotate(Vec3::Y), Vec3::Z));
        // Y -> (Z by 90) -> -X -> (X by 90) -> -X
        let composed = rx * rz;
        assert!(vec_approx_eq(composed.rotate(Vec3::Y), -Vec3::X));
    }

    #[test]
    fn test_compose_inverse_is_identity() {
        let q = Quat::from_euler_xyz(0.3, -1.1, 2.0);
        let id = q * q.inverse();
        assert!(approx_eq(id.w.abs(), 1.0), "Expected identity, got {:?}", id);
    }

    #[test]
    fn test_euler_single_axis_matches_axis_angle() {
        let a = Quat::from_euler_xyz(0.0, 0.0, PI / 4.0);
        let b = Quat::from_axis_angle(Vec3::Z, PI / 4.0);
        assert!(a.angle_to(&b) < 0.001);

        let a = Quat::from_euler_xyz(PI / 5.0, 0.0, 0.0);
        let b = Quat::from_axis_angle(Vec3::X, PI / 5.0);
        assert!(a.angle_to(&b) < 0.001);
    }

    #[test]
    fn test_euler_xyz_order() {
        // Intrinsic XYZ: rotate about X first, then the rotated Y
        let q = Quat::from_euler_xyz(PI / 2.0, PI / 2.0, 0.0);
        let expected = Quat::from_axis_angle(Vec3::X, PI / 2.0) * Quat::from_axis_angle(Vec3::Y, PI / 2.0);
        assert!(q.angle_to(&expected) < 0.001);
    }

    #[test]
    fn test_normalize() {
        let q = Quat::from_xyzw(0.0, 0.0, 2.0, 2.0).normalize();
        assert!(approx_eq(q.length(), 1.0));
    }

    #[test]
    fn test_normalize_degenerate_is_identity() {
        let zero = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero.normalize(), Quat::IDENTITY);
        let nan = Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0);
        assert_eq!(nan.normalize(), Quat::IDENTITY);
    }

    #[test]
    fn test_angle_to_ignores_double_cover() {
        let q = Quat::from_axis_angle(Vec3::Y, 0.7);
        let neg = Quat::from_xyzw(-q.x, -q.y, -q.z, -q.w);
        assert!(q.angle_to(&neg) < 0.001);
        assert!(approx_eq(Quat::IDENTITY.angle_to(&q), 0.7));
    }

    #[test]
    fn test_to_matrix3_identity() {
        let m = Quat::IDENTITY.to_matrix3();
        assert_eq!(m, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }
}
