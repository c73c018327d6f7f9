//! Per-object shape data
//!
//! A [`GeometryDescriptor`] holds everything the renderer needs to build an
//! object's mesh. Descriptors are created once when a scene is composed and are
//! never mutated afterwards. All shapes live in **local space**, centered on the
//! origin; the owning entity's transform places them in the world.

use std::fmt;

use glassdrift_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::cube_frame::{frame_mesh, CubeFrame, EdgePlacement};
use crate::cylinder::Cylinder;
use crate::extrude::{extrude, ExtrudeSettings};
use crate::mesh::Mesh;
use crate::outline::{triangle_ring, Outline, Shape2D};
use crate::torus::Torus;
use crate::tube::{tube_mesh, SpiralTubeParams};

/// Parameters of the rounded triangular ring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangleRingParams {
    pub outer_side: f32,
    pub inner_side: f32,
    /// Rounding of the outer corners; the inner hole stays sharp
    pub corner_radius: f32,
    pub extrude: ExtrudeSettings,
}

impl Default for TriangleRingParams {
    fn default() -> Self {
        Self {
            outer_side: 3.0,
            inner_side: 2.6,
            corner_radius: 0.2,
            extrude: ExtrudeSettings::default(),
        }
    }
}

/// Shape data owned by one animated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryDescriptor {
    Torus(Torus),
    /// Extruded outline with one reverse-wound hole
    RoundedTriangleRing {
        outer: Outline,
        inner: Outline,
        extrude: ExtrudeSettings,
    },
    /// One `edge` cylinder instanced at every placement
    CubeFrame {
        edges: Vec<EdgePlacement>,
        edge: Cylinder,
    },
    /// Circular tube swept along pre-sampled curve points
    Tube {
        samples: Vec<Vec3>,
        tube_radius: f32,
        radial_segments: u32,
    },
}

/// Discriminant of a [`GeometryDescriptor`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Torus,
    RoundedTriangleRing,
    CubeFrame,
    Tube,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Torus => "torus",
            GeometryKind::RoundedTriangleRing => "rounded triangle ring",
            GeometryKind::CubeFrame => "cube frame",
            GeometryKind::Tube => "tube",
        };
        f.write_str(name)
    }
}

impl GeometryDescriptor {
    pub fn torus(torus: Torus) -> Self {
        GeometryDescriptor::Torus(torus)
    }

    /// Build the ring outlines from their parameters
    pub fn triangle_ring(params: &TriangleRingParams) -> Self {
        let (outer, inner) = triangle_ring(params.outer_side, params.inner_side, params.corner_radius);
        GeometryDescriptor::RoundedTriangleRing {
            outer,
            inner,
            extrude: params.extrude,
        }
    }

    /// Lay out the twelve edges of a cube frame
    pub fn cube_frame(frame: &CubeFrame) -> Self {
        GeometryDescriptor::CubeFrame {
            edges: frame.edges(),
            edge: frame.edge_cylinder(),
        }
    }

    /// Sample the spiral center line
    pub fn spiral_tube(params: &SpiralTubeParams) -> Self {
        GeometryDescriptor::Tube {
            samples: params.samples(),
            tube_radius: params.tube_radius,
            radial_segments: params.radial_segments,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            GeometryDescriptor::Torus(_) => GeometryKind::Torus,
            GeometryDescriptor::RoundedTriangleRing { .. } => GeometryKind::RoundedTriangleRing,
            GeometryDescriptor::CubeFrame { .. } => GeometryKind::CubeFrame,
            GeometryDescriptor::Tube { .. } => GeometryKind::Tube,
        }
    }

    /// Build the renderable triangle mesh in local space
    pub fn to_mesh(&self) -> Mesh {
        match self {
            GeometryDescriptor::Torus(torus) => torus.to_mesh(),
            GeometryDescriptor::RoundedTriangleRing { outer, inner, extrude: settings } => {
                let shape = Shape2D::new(outer.clone()).with_hole(inner.clone());
                extrude(&shape, settings)
            }
            GeometryDescriptor::CubeFrame { edges, edge } => frame_mesh(edges, edge),
            GeometryDescriptor::Tube { samples, tube_radius, radial_segments } => {
                tube_mesh(samples, *tube_radius, *radial_segments)
            }
        }
    }
}
