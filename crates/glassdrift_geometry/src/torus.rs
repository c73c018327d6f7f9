//! Torus surface lying in the XY plane

use std::f32::consts::TAU;

use glassdrift_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::mesh::Mesh;

/// Ring torus around the Z axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Torus {
    /// Distance from the center to the middle of the tube
    pub major_radius: f32,
    /// Radius of the tube
    pub minor_radius: f32,
    /// Segments around the tube cross-section
    pub radial_segments: u32,
    /// Segments around the main ring
    pub tubular_segments: u32,
}

impl Default for Torus {
    fn default() -> Self {
        Self {
            major_radius: 1.3,
            minor_radius: 0.2,
            radial_segments: 64,
            tubular_segments: 256,
        }
    }
}

impl Torus {
    pub fn new(major_radius: f32, minor_radius: f32) -> Self {
        Self {
            major_radius,
            minor_radius,
            ..Self::default()
        }
    }

    pub fn with_segments(mut self, radial: u32, tubular: u32) -> Self {
        self.radial_segments = radial;
        self.tubular_segments = tubular;
        self
    }

    pub fn to_mesh(&self) -> Mesh {
        let radial = self.radial_segments.max(3) as usize;
        let tubular = self.tubular_segments.max(3) as usize;
        let row = tubular + 1;
        let mut mesh = Mesh::with_capacity((radial + 1) * row, radial * tubular * 6);

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let (sin_v, cos_v) = v.sin_cos();
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let (sin_u, cos_u) = u.sin_cos();

                let ring = self.major_radius + self.minor_radius * cos_v;
                let position = Vec3::new(ring * cos_u, ring * sin_u, self.minor_radius * sin_v);
                let center = Vec3::new(self.major_radius * cos_u, self.major_radius * sin_u, 0.0);
                mesh.push_vertex(position, (position - center).normalized());
            }
        }

        for j in 1..=radial {
            for i in 1..=tubular {
                let a = (row * j + i - 1) as u32;
                let b = (row * (j - 1) + i - 1) as u32;
                let c = (row * (j - 1) + i) as u32;
                let d = (row * j + i) as u32;
                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        mesh
    }
}
