//! Spring-damper pose animation for Glassdrift
//!
//! This crate moves rigid poses, not rigid bodies: there is no mass, gravity
//! or collision. Each [`AnimatedBody`] is pulled back toward a fixed rest pose
//! and pushed around by pointer contact.
//! - [`SpringTuning`] - validated spring, damping and impulse coefficients
//! - [`AnimatedBody`] - rest pose, live pose and velocities, advanced per tick
//! - [`ImpulseMapper`] - world contact point to velocity impulse
//! - [`DriftWorld`] - owns the bodies and clamps frame time

pub mod body;
pub mod impulse;
pub mod tuning;
pub mod world;

// Re-export commonly used types
pub use body::{AnimatedBody, BodyKey};
pub use impulse::{Impulse, ImpulseMapper, DEFAULT_JITTER};
pub use tuning::{SpringTuning, TuningError};
pub use world::{DriftConfig, DriftWorld};
