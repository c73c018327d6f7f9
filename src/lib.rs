//! Glassdrift - drifting glass shapes that spring back from pointer contact
//!
//! The library side of the application: configuration, scene layout and the
//! frame driver. The simulation itself lives in the `glassdrift_*` crates.

pub mod config;
pub mod scene;
pub mod systems;
