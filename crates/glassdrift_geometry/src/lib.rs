//! Procedural geometry for Glassdrift
//!
//! Generators are pure: the same parameters always produce the same outline
//! or mesh, and no state is shared between calls.
//!
//! - [`Outline`] / [`Shape2D`] - closed 2D paths with holes
//! - [`rounded_triangle`] / [`triangle_ring`] - the rounded triangular ring outline
//! - [`extrude`] - bevelled extrusion of a [`Shape2D`] into a solid
//! - [`SpiralCurve`] and [`tube_mesh`] - the spiral tube
//! - [`CubeFrame`] - twelve cylinder edges of a hollow cube
//! - [`Torus`] and [`Cylinder`] - primitive surfaces
//! - [`GeometryDescriptor`] - per-object shape data handed to the renderer

pub mod mesh;
pub mod outline;
pub mod triangulate;
pub mod extrude;
pub mod curve;
pub mod tube;
pub mod torus;
pub mod cylinder;
pub mod cube_frame;
pub mod descriptor;

pub use mesh::{Mesh, MeshVertex};
pub use outline::{rounded_triangle, triangle_ring, Outline, PathSegment, Shape2D};
pub use triangulate::triangulate;
pub use extrude::{extrude, extrude_ring, ExtrudeSettings};
pub use curve::{Curve3, SpiralCurve};
pub use tube::{tube_mesh, SpiralTubeParams};
pub use torus::Torus;
pub use cylinder::Cylinder;
pub use cube_frame::{frame_mesh, CubeFrame, EdgePlacement, CUBE_EDGES};
pub use descriptor::{GeometryDescriptor, GeometryKind, TriangleRingParams};
