//! 3D Mathematics Library
//!
//! This crate provides the vector and rotation types for the Glassdrift engine.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector used for shape outlines
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion for 3D orientation

mod vec2;
mod vec3;
mod quat;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use quat::Quat;
