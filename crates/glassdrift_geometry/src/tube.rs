//! Tubes of constant circular cross-section swept along sampled curves
//!
//! Cross-sections are oriented with parallel-transport frames: the normal is
//! carried from sample to sample by the minimal rotation between successive
//! tangents, so the tube never twists around its own axis.

use std::f32::consts::TAU;

use glassdrift_math::{Quat, Vec3};
use serde::{Serialize, Deserialize};

use crate::curve::{Curve3, SpiralCurve};
use crate::mesh::Mesh;

/// Tangents shorter than this are treated as a stalled curve
const DEGENERATE: f32 = 1e-6;

/// Orthonormal frame at one curve sample
#[derive(Clone, Copy, Debug)]
struct Frame {
    normal: Vec3,
    binormal: Vec3,
}

fn tangents(samples: &[Vec3]) -> Vec<Vec3> {
    let n = samples.len();
    let mut tangents: Vec<Vec3> = (0..n)
        .map(|i| (samples[(i + 1).min(n - 1)] - samples[i.saturating_sub(1)]).normalized())
        .collect();

    // Stalled samples inherit the last good direction
    let mut last = tangents.iter().copied().find(|t| *t != Vec3::ZERO).unwrap_or(Vec3::Y);
    for t in tangents.iter_mut() {
        if *t == Vec3::ZERO {
            *t = last;
        } else {
            last = *t;
        }
    }
    tangents
}

fn parallel_transport_frames(tangents: &[Vec3]) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(tangents.len());
    let Some(&first) = tangents.first() else {
        return frames;
    };

    let mut normal = first.cross(first.any_orthonormal());

    for (i, &t) in tangents.iter().enumerate() {
        if i > 0 {
            let prev = tangents[i - 1];
            let axis = prev.cross(t);
            if axis.length() > DEGENERATE {
                let angle = prev.dot(t).clamp(-1.0, 1.0).acos();
                normal = Quat::from_axis_angle(axis.normalized(), angle).rotate(normal);
            }
        }
        frames.push(Frame {
            normal,
            binormal: t.cross(normal),
        });
    }
    frames
}

/// Build a tube of `radius` around a polyline of curve samples
///
/// Each sample gets a ring of `radial_segments + 1` vertices (the seam is
/// duplicated). The ends are left open. Fewer than two samples yields an
/// empty mesh.
pub fn tube_mesh(samples: &[Vec3], radius: f32, radial_segments: u32) -> Mesh {
    if samples.len() < 2 {
        return Mesh::new();
    }
    let radial = radial_segments.max(3) as usize;
    let frames = parallel_transport_frames(&tangents(samples));

    let ring = radial + 1;
    let mut mesh = Mesh::with_capacity(samples.len() * ring, (samples.len() - 1) * radial * 6);

    for (center, frame) in samples.iter().zip(&frames) {
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let n = (frame.normal * -v.cos() + frame.binormal * v.sin()).normalized();
            mesh.push_vertex(*center + n * radius, n);
        }
    }

    for j in 1..samples.len() {
        for i in 1..=radial {
            let a = (ring * (j - 1) + i - 1) as u32;
            let b = (ring * j + i - 1) as u32;
            let c = (ring * j + i) as u32;
            let d = (ring * (j - 1) + i) as u32;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }

    mesh
}

/// The spiral tube shape: a helix curve plus its sweep resolution
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralTubeParams {
    pub curve: SpiralCurve,
    pub tubular_segments: u32,
    pub tube_radius: f32,
    pub radial_segments: u32,
}

impl Default for SpiralTubeParams {
    fn default() -> Self {
        Self {
            curve: SpiralCurve::default(),
            tubular_segments: 200,
            tube_radius: 0.18,
            radial_segments: 8,
        }
    }
}

impl SpiralTubeParams {
    /// Curve samples along the tube center line
    pub fn samples(&self) -> Vec<Vec3> {
        self.curve.sample(self.tubular_segments as usize)
    }

    pub fn to_mesh(&self) -> Mesh {
        tube_mesh(&self.samples(), self.tube_radius, self.radial_segments)
    }
}
