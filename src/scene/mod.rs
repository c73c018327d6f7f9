//! Scene construction utilities
//!
//! This module lays out the drifting shapes and their rest poses.

mod scene_builder;

pub use scene_builder::{Placement, SceneBuilder, CUBE_FRAME, GLASS_RING, SPIRAL_HELIX, TRIANGLE_RING};
