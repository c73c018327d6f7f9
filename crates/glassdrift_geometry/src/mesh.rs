//! Indexed triangle mesh ready for GPU upload

use bytemuck::{Pod, Zeroable};
use glassdrift_math::{Quat, Vec3};

/// A single mesh vertex (position + normal)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    #[inline]
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Indexed triangle list with counter-clockwise front faces
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Add a vertex and return its index
    #[inline]
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex::new(position, normal));
        index
    }

    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |t| {
            [
                self.vertices[t[0] as usize].position(),
                self.vertices[t[1] as usize].position(),
                self.vertices[t[2] as usize].position(),
            ]
        })
    }

    /// Append another mesh after rotating and translating it
    pub fn append_transformed(&mut self, other: &Mesh, rotation: Quat, translation: Vec3) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices.iter().map(|v| {
            MeshVertex::new(
                rotation.rotate(v.position()) + translation,
                rotation.rotate(v.normal()),
            )
        }));
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Recompute vertex normals as the area-weighted average of adjacent faces
    pub fn compute_smooth_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];
        for t in self.indices.chunks_exact(3) {
            let a = self.vertices[t[0] as usize].position();
            let b = self.vertices[t[1] as usize].position();
            let c = self.vertices[t[2] as usize].position();
            let face = (b - a).cross(c - a);
            for &i in t {
                accum[i as usize] += face;
            }
        }
        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            vertex.normal = n.normalized().to_array();
        }
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position();
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            let p = v.position();
            (lo.min_components(p), hi.max_components(p))
        }))
    }

    /// Signed enclosed volume (positive for closed meshes with outward faces)
    pub fn signed_volume(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| a.dot(b.cross(c)) / 6.0)
            .sum()
    }
}
