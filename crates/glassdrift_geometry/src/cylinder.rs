//! Capped cylinder aligned with the Y axis

use std::f32::consts::TAU;

use glassdrift_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::mesh::Mesh;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cylinder {
    pub radius: f32,
    /// Extent along Y, centered on the origin
    pub length: f32,
    pub radial_segments: u32,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            radius: 0.15,
            length: 2.0,
            radial_segments: 16,
        }
    }
}

impl Cylinder {
    pub fn new(radius: f32, length: f32, radial_segments: u32) -> Self {
        Self {
            radius,
            length,
            radial_segments,
        }
    }

    /// Closed mesh: side wall plus flat top and bottom caps
    pub fn to_mesh(&self) -> Mesh {
        let segments = self.radial_segments.max(3) as usize;
        let half = self.length / 2.0;
        let ring = segments + 1;
        let mut mesh = Mesh::with_capacity(4 * ring + 2, segments * 12);

        let around = |x: usize| {
            let theta = x as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            Vec3::new(sin, 0.0, cos)
        };

        // Side wall, top row then bottom row
        for y in [half, -half] {
            for x in 0..=segments {
                let dir = around(x);
                mesh.push_vertex(dir * self.radius + Vec3::new(0.0, y, 0.0), dir);
            }
        }
        for x in 0..segments {
            let a = x as u32;
            let b = (ring + x) as u32;
            let c = (ring + x + 1) as u32;
            let d = (x + 1) as u32;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }

        for (y, normal) in [(half, Vec3::Y), (-half, -Vec3::Y)] {
            let center = mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal);
            let first = mesh.vertex_count() as u32;
            for x in 0..=segments {
                mesh.push_vertex(around(x) * self.radius + Vec3::new(0.0, y, 0.0), normal);
            }
            for x in 0..segments as u32 {
                if y > 0.0 {
                    mesh.push_triangle(center, first + x, first + x + 1);
                } else {
                    mesh.push_triangle(first + x + 1, first + x, center);
                }
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mesh = Cylinder::new(0.5, 1.0, 8).to_mesh();
        assert_eq!(mesh.vertex_count(), 2 * 9 + 2 * (9 + 1));
        assert_eq!(mesh.triangle_count(), 8 * 2 + 8 * 2);
    }

    #[test]
    fn test_bounds() {
        let (lo, hi) = Cylinder::default().to_mesh().bounds().unwrap();
        assert!((lo.y + 1.0).abs() < 0.0001);
        assert!((hi.y - 1.0).abs() < 0.0001);
        assert!((hi.z - 0.15).abs() < 0.0001);
    }

    #[test]
    fn test_volume_of_prism() {
        // Inscribed polygon area times length
        let n = 16.0_f32;
        let r = 0.15_f32;
        let area = 0.5 * n * r * r * (std::f32::consts::TAU / n).sin();
        let volume = Cylinder::default().to_mesh().signed_volume();
        assert!((volume - area * 2.0).abs() < 0.0001, "volume {}", volume);
    }

    #[test]
    fn test_faces_point_outward() {
        let mesh = Cylinder::default().to_mesh();
        for t in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [t[0], t[1], t[2]].map(|i| mesh.vertices[i as usize]);
            let face = (b.position() - a.position()).cross(c.position() - a.position());
            assert!(face.dot(a.normal() + b.normal() + c.normal()) > 0.0);
        }
    }
}
