//! Bevelled extrusion of a 2D shape into a closed solid
//!
//! The shape is swept along +Z from `z = 0` to `z = depth`. With bevels enabled
//! each face gains `bevel_segments` quarter-circle layers that grow the outline
//! by up to `bevel_size` while pushing the caps out by `bevel_thickness`, so the
//! finished solid spans `-bevel_thickness ..= depth + bevel_thickness`.

use std::f32::consts::FRAC_PI_2;

use glassdrift_math::{Vec2, Vec3};
use serde::{Serialize, Deserialize};

use crate::mesh::Mesh;
use crate::outline::{signed_area, Outline, Shape2D};
use crate::triangulate::triangulate;

/// Largest miter stretch applied to a bevel offset at sharp corners
const MAX_MITER: f32 = 4.0;

/// Parameters of [`extrude`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeSettings {
    /// Distance between the two unbevelled faces
    pub depth: f32,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    /// Zero disables bevelling
    pub bevel_segments: u32,
    /// Layers along the straight body
    pub steps: u32,
    /// Points per quadratic segment when flattening outlines
    pub curve_segments: u32,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            depth: 0.15,
            bevel_thickness: 0.09,
            bevel_size: 0.09,
            bevel_segments: 8,
            steps: 1,
            curve_segments: 12,
        }
    }
}

impl ExtrudeSettings {
    /// Whether any bevel layers will be generated
    pub fn has_bevel(&self) -> bool {
        self.bevel_segments > 0 && (self.bevel_thickness > 0.0 || self.bevel_size > 0.0)
    }

    /// `(z, outward offset)` of every ring layer, front to back
    fn layers(&self) -> Vec<(f32, f32)> {
        let steps = self.steps.max(1);
        let mut layers = Vec::new();

        let bevel = |b: u32| {
            let t = b as f32 / self.bevel_segments as f32;
            let (s, c) = (t * FRAC_PI_2).sin_cos();
            (self.bevel_thickness * c, self.bevel_size * s)
        };

        if self.has_bevel() {
            for b in 0..self.bevel_segments {
                let (z, offset) = bevel(b);
                layers.push((-z, offset));
            }
        }

        let body_offset = if self.has_bevel() { self.bevel_size } else { 0.0 };
        for s in 0..=steps {
            layers.push((self.depth * s as f32 / steps as f32, body_offset));
        }

        if self.has_bevel() {
            for b in (0..self.bevel_segments).rev() {
                let (z, offset) = bevel(b);
                layers.push((self.depth + z, offset));
            }
        }

        layers
    }
}

/// Extrude `shape` into a closed triangle mesh with outward-facing triangles
///
/// Holes are cut through the whole solid. Side normals are smoothed across
/// layers; cap normals point straight along -Z and +Z. A shape whose outline
/// flattens to fewer than three points yields an empty mesh.
pub fn extrude(shape: &Shape2D, settings: &ExtrudeSettings) -> Mesh {
    let curve_segments = settings.curve_segments.max(1) as usize;

    let contour = ring_points(&shape.outline, curve_segments, true);
    if contour.len() < 3 {
        log::warn!("cannot extrude an outline with {} distinct points", contour.len());
        return Mesh::new();
    }
    let holes: Vec<Vec<Vec2>> = shape
        .holes
        .iter()
        .map(|hole| ring_points(hole, curve_segments, false))
        .filter(|hole| hole.len() >= 3)
        .collect();

    // Contour first, then holes, in the order triangulate() indexes them
    let mut rings: Vec<(usize, Vec<Vec2>)> = Vec::with_capacity(holes.len() + 1);
    let mut offset = 0;
    for ring in std::iter::once(&contour).chain(&holes) {
        rings.push((offset, bevel_directions(ring)));
        offset += ring.len();
    }
    let ring_total = offset;
    let flat: Vec<Vec2> = std::iter::once(&contour).chain(&holes).flatten().copied().collect();

    let layers = settings.layers();
    let caps = triangulate(&contour, &holes);

    let mut mesh = Mesh::with_capacity(
        layers.len() * ring_total + 2 * ring_total,
        (layers.len() - 1) * ring_total * 6 + caps.len() * 6,
    );

    // Side walls
    for &(z, bevel) in &layers {
        for (base, directions) in &rings {
            for (i, dir) in directions.iter().enumerate() {
                let p = flat[base + i] + *dir * bevel;
                mesh.push_vertex(Vec3::new(p.x, p.y, z), Vec3::ZERO);
            }
        }
    }
    for layer in 0..layers.len() - 1 {
        let row = (layer * ring_total) as u32;
        let next_row = row + ring_total as u32;
        for (base, directions) in &rings {
            let n = directions.len();
            for i in 0..n {
                let i0 = (base + i) as u32;
                let i1 = (base + (i + 1) % n) as u32;
                mesh.push_triangle(row + i0, row + i1, next_row + i1);
                mesh.push_triangle(row + i0, next_row + i1, next_row + i0);
            }
        }
    }

    // Smooth only the walls; caps get flat normals
    mesh.compute_smooth_normals();

    // Caps reuse the unbevelled outline at the outermost layers
    let (front_z, _) = layers[0];
    let (back_z, _) = layers[layers.len() - 1];

    let front = mesh.vertex_count() as u32;
    for p in &flat {
        mesh.push_vertex(Vec3::new(p.x, p.y, front_z), -Vec3::Z);
    }
    for [a, b, c] in &caps {
        mesh.push_triangle(front + a, front + c, front + b);
    }

    let back = mesh.vertex_count() as u32;
    for p in &flat {
        mesh.push_vertex(Vec3::new(p.x, p.y, back_z), Vec3::Z);
    }
    for [a, b, c] in &caps {
        mesh.push_triangle(back + a, back + b, back + c);
    }

    mesh
}

/// Flatten an outline into an open ring with the requested winding
fn ring_points(outline: &Outline, curve_segments: usize, counter_clockwise: bool) -> Vec<Vec2> {
    let mut points = outline.points(curve_segments);
    if points.len() > 1 && points[0].distance(points[points.len() - 1]) < 1e-6 {
        points.pop();
    }
    if (signed_area(&points) > 0.0) != counter_clockwise {
        points.reverse();
    }
    points
}

/// Per-point offset directions pointing away from the solid
///
/// Each direction is the miter of the two adjacent edge normals, stretched so
/// that offset edges stay parallel to the input edges.
fn bevel_directions(ring: &[Vec2]) -> Vec<Vec2> {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let here = ring[i];
            let next = ring[(i + 1) % n];

            let n0 = edge_normal(here - prev);
            let n1 = edge_normal(next - here);
            let miter = (n0 + n1).normalized();
            if miter == Vec2::ZERO {
                return n0;
            }
            let stretch = 1.0 / miter.dot(n0).max(1.0 / MAX_MITER);
            miter * stretch
        })
        .collect()
}

/// Right-hand unit normal of an edge direction
#[inline]
fn edge_normal(edge: Vec2) -> Vec2 {
    Vec2::new(edge.y, -edge.x).normalized()
}

/// Convenience: extrude an outline with a single hole
pub fn extrude_ring(outer: &Outline, inner: &Outline, settings: &ExtrudeSettings) -> Mesh {
    extrude(&Shape2D::new(outer.clone()).with_hole(inner.clone()), settings)
}
