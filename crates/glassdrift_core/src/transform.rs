//! 3D Transform (position, rotation, scale)
//!
//! A Transform3D places an entity's local-space geometry in the world.

use glassdrift_math::{Quat, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D transform with position, rotation, and uniform scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub position: Vec3,
    /// Unit quaternion
    pub rotation: Quat,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }

    pub fn new(position: Vec3, rotation: Quat, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform from XYZ Euler angles in radians
    pub fn from_euler(position: Vec3, euler: Vec3, scale: f32) -> Self {
        Self::new(position, Quat::from_euler_xyz(euler.x, euler.y, euler.z), scale)
    }

    /// Rotation only, as a column-major 3x3 matrix
    #[inline]
    pub fn rotation_matrix(&self) -> [[f32; 3]; 3] {
        self.rotation.to_matrix3()
    }

    /// Full model matrix in column-major order (scale, then rotate, then translate)
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        let [x, y, z] = self.rotation_matrix();
        let s = self.scale;
        let p = self.position;
        [
            [x[0] * s, x[1] * s, x[2] * s, 0.0],
            [y[0] * s, y[1] * s, y[2] * s, 0.0],
            [z[0] * s, z[1] * s, z[2] * s, 0.0],
            [p.x, p.y, p.z, 1.0],
        ]
    }

    /// Transform a point from local space to world space
    ///
    /// Applies scale, then rotation, then translation.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p * self.scale) + self.position
    }

    /// Transform a direction from local space to world space (no translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.rotation.rotate(d * self.scale)
    }

    /// Compute the inverse transform
    ///
    /// `transform.inverse().transform_point(transform.transform_point(p)) == p`
    pub fn inverse(&self) -> Self {
        let inv_scale = if self.scale.abs() > 1e-10 {
            1.0 / self.scale
        } else {
            1.0
        };
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_rotation.rotate(-self.position) * inv_scale;

        Self {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Compose two transforms: result = self * other
    ///
    /// The composed transform applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: (self.rotation * other.rotation).normalize(),
            scale: self.scale * other.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity_transform() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Transform3D::identity().transform_point(p), p));
    }

    #[test]
    fn test_transform_order() {
        // X * 2 = (2, 0, 0), rotated 90° about Z = (0, 2, 0), + (10, 0, 0)
        let t = Transform3D::new(
            Vec3::new(10.0, 0.0, 0.0),
            Quat::from_axis_angle(Vec3::Z, PI / 2.0),
            2.0,
        );
        let transformed = t.transform_point(Vec3::X);
        assert!(vec_approx_eq(transformed, Vec3::new(10.0, 2.0, 0.0)), "got {:?}", transformed);
        assert!(vec_approx_eq(t.transform_direction(Vec3::X), Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_inverse() {
        let t = Transform3D::from_euler(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.3, -0.5, 1.2), 1.5);
        let p = Vec3::new(-4.0, 0.5, 2.0);
        let back = t.inverse().transform_point(t.transform_point(p));
        assert!(vec_approx_eq(back, p), "got {:?}", back);
    }

    #[test]
    fn test_compose() {
        let a = Transform3D::from_euler(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.7), 2.0);
        let b = Transform3D::from_euler(Vec3::new(0.0, -1.0, 0.5), Vec3::new(0.4, 0.0, 0.0), 0.5);
        let p = Vec3::new(0.3, 0.2, -0.1);
        let composed = a.compose(&b).transform_point(p);
        let sequential = a.transform_point(b.transform_point(p));
        assert!(vec_approx_eq(composed, sequential));
    }

    #[test]
    fn test_to_matrix_matches_transform_point() {
        let t = Transform3D::from_euler(Vec3::new(-7.25, 0.0, 0.0), Vec3::new(PI / 5.0, PI / 4.0, 0.0), 1.4);
        let m = t.to_matrix();
        let p = Vec3::new(1.0, -1.0, 1.0);
        let by_matrix = Vec3::new(
            m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
            m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
        );
        assert!(vec_approx_eq(by_matrix, t.transform_point(p)));
        assert_eq!(m[3][3], 1.0);
    }
}
