//! Wireframe cube built from twelve cylinder edges

use std::f32::consts::FRAC_PI_2;

use glassdrift_math::{Quat, Vec3};
use serde::{Serialize, Deserialize};

use crate::cylinder::Cylinder;
use crate::mesh::Mesh;

/// Where one Y-aligned edge cylinder sits in the frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgePlacement {
    pub position: Vec3,
    /// Euler angles in radians, XYZ order
    pub rotation: Vec3,
}

impl EdgePlacement {
    const fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler_xyz(self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// The two ends of an edge of the given length
    pub fn endpoints(&self, length: f32) -> (Vec3, Vec3) {
        let along = self.orientation().rotate(Vec3::Y) * (length / 2.0);
        (self.position - along, self.position + along)
    }
}

const NONE: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const ABOUT_Z: Vec3 = Vec3::new(0.0, 0.0, FRAC_PI_2);
const ABOUT_X: Vec3 = Vec3::new(FRAC_PI_2, 0.0, 0.0);

/// Edge layout of a cube with half-extent 1
pub const CUBE_EDGES: [EdgePlacement; 12] = [
    // Vertical
    EdgePlacement::new(Vec3::new(1.0, 0.0, 1.0), NONE),
    EdgePlacement::new(Vec3::new(-1.0, 0.0, 1.0), NONE),
    EdgePlacement::new(Vec3::new(1.0, 0.0, -1.0), NONE),
    EdgePlacement::new(Vec3::new(-1.0, 0.0, -1.0), NONE),
    // Along X
    EdgePlacement::new(Vec3::new(0.0, 1.0, 1.0), ABOUT_Z),
    EdgePlacement::new(Vec3::new(0.0, -1.0, 1.0), ABOUT_Z),
    EdgePlacement::new(Vec3::new(0.0, 1.0, -1.0), ABOUT_Z),
    EdgePlacement::new(Vec3::new(0.0, -1.0, -1.0), ABOUT_Z),
    // Along Z
    EdgePlacement::new(Vec3::new(1.0, 1.0, 0.0), ABOUT_X),
    EdgePlacement::new(Vec3::new(-1.0, 1.0, 0.0), ABOUT_X),
    EdgePlacement::new(Vec3::new(1.0, -1.0, 0.0), ABOUT_X),
    EdgePlacement::new(Vec3::new(-1.0, -1.0, 0.0), ABOUT_X),
];

/// Hollow cube drawn as twelve round edges
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeFrame {
    pub half_extent: f32,
    /// Diameter of each edge cylinder
    pub edge_thickness: f32,
    pub radial_segments: u32,
}

impl Default for CubeFrame {
    fn default() -> Self {
        Self {
            half_extent: 1.0,
            edge_thickness: 0.3,
            radial_segments: 16,
        }
    }
}

impl CubeFrame {
    /// Edge placements scaled to this frame's half-extent
    pub fn edges(&self) -> Vec<EdgePlacement> {
        CUBE_EDGES
            .iter()
            .map(|e| EdgePlacement::new(e.position * self.half_extent, e.rotation))
            .collect()
    }

    /// The cylinder instanced at every edge
    pub fn edge_cylinder(&self) -> Cylinder {
        Cylinder::new(
            self.edge_thickness / 2.0,
            self.half_extent * 2.0,
            self.radial_segments,
        )
    }

    pub fn to_mesh(&self) -> Mesh {
        frame_mesh(&self.edges(), &self.edge_cylinder())
    }
}

/// Merge one edge cylinder per placement into a single mesh
pub fn frame_mesh(edges: &[EdgePlacement], edge: &Cylinder) -> Mesh {
    let cylinder = edge.to_mesh();
    let mut mesh = Mesh::with_capacity(
        cylinder.vertex_count() * edges.len(),
        cylinder.indices.len() * edges.len(),
    );
    for placement in edges {
        mesh.append_transformed(&cylinder, placement.orientation(), placement.position);
    }
    mesh
}
