//! Parametric 3D curves

use std::f32::consts::TAU;

use glassdrift_math::Vec3;
use serde::{Serialize, Deserialize};

/// A curve defined over `t ∈ [0, 1]`
pub trait Curve3 {
    /// Point on the curve at parameter `t`
    fn point_at(&self, t: f32) -> Vec3;

    /// `segments + 1` evenly spaced samples, endpoints included
    fn sample(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}

/// Helix around the Y axis, centered on the origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralCurve {
    /// Full revolutions between `t = 0` and `t = 1`
    pub turns: f32,
    pub radius: f32,
    /// Total rise along Y
    pub height: f32,
}

impl Default for SpiralCurve {
    fn default() -> Self {
        Self {
            turns: 2.5,
            radius: 0.6,
            height: 2.8,
        }
    }
}

impl Curve3 for SpiralCurve {
    fn point_at(&self, t: f32) -> Vec3 {
        let angle = TAU * self.turns * t;
        Vec3::new(
            angle.cos() * self.radius,
            t * self.height - self.height / 2.0,
            angle.sin() * self.radius,
        )
    }
}
