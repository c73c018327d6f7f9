//! Application systems
//!
//! Frame driving split out of main.rs so it can run headless and under test.

mod simulation;

pub use simulation::{PointerSweep, SimulationResult, SimulationSystem};
