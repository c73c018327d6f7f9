//! Core types for Glassdrift
//!
//! This crate ties geometry and drift animation into a scene a host can drive:
//!
//! - [`Transform3D`] - Position, rotation, and scale in 3D space
//! - [`Entity`] - A named shape with a transform and optional drift body
//! - [`HoverState`] / [`DirtyFlags`] - cosmetic hover and change tracking
//! - [`World`] - Container for all entities, and the host-facing tick/pointer API
//! - [`EntityKey`] - Generational key to an entity in the world

mod transform;
mod entity;
mod world;

pub use transform::Transform3D;
pub use entity::{DirtyFlags, Entity, HoverState};
pub use world::{EntityKey, World};

// Re-export commonly used types for convenience
pub use glassdrift_math::{Quat, Vec2, Vec3};
pub use glassdrift_geometry::{GeometryDescriptor, GeometryKind, Mesh, MeshVertex};
pub use glassdrift_physics::{AnimatedBody, BodyKey, DriftConfig, DriftWorld, Impulse, ImpulseMapper, SpringTuning};
