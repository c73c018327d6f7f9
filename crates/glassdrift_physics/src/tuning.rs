//! Spring-damper tuning shared by animated bodies

use std::fmt;

/// Coefficients of the spring-back response
///
/// `spring` pulls the pose toward rest, `damping` scales velocity every tick,
/// `push_force` scales pointer impulses and `max_impulse_radius` bounds how far
/// from the body origin a contact point can lever the impulse. Values are
/// validated on construction, so a `SpringTuning` is always usable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTuning {
    spring: f32,
    damping: f32,
    push_force: f32,
    max_impulse_radius: f32,
}

impl Default for SpringTuning {
    fn default() -> Self {
        Self {
            spring: 30.0,
            damping: 0.85,
            push_force: 1.5,
            max_impulse_radius: 0.3,
        }
    }
}

impl SpringTuning {
    /// Slow, floaty return that takes several seconds to settle
    pub const SOFT: Self = Self {
        spring: 5.0,
        damping: 0.85,
        push_force: 1.5,
        max_impulse_radius: 0.3,
    };

    /// Quick return with little overshoot
    pub const SNAPPY: Self = Self {
        spring: 60.0,
        damping: 0.8,
        push_force: 1.0,
        max_impulse_radius: 0.3,
    };

    /// Validate and build a tuning
    ///
    /// Requires `spring > 0`, `0 <= damping < 1`, `push_force >= 0` and
    /// `max_impulse_radius >= 0`, all finite.
    pub fn new(
        spring: f32,
        damping: f32,
        push_force: f32,
        max_impulse_radius: f32,
    ) -> Result<Self, TuningError> {
        if !(spring.is_finite() && spring > 0.0) {
            return Err(TuningError::Spring(spring));
        }
        if !(damping.is_finite() && (0.0..1.0).contains(&damping)) {
            return Err(TuningError::Damping(damping));
        }
        if !(push_force.is_finite() && push_force >= 0.0) {
            return Err(TuningError::PushForce(push_force));
        }
        if !(max_impulse_radius.is_finite() && max_impulse_radius >= 0.0) {
            return Err(TuningError::ImpulseRadius(max_impulse_radius));
        }
        Ok(Self {
            spring,
            damping,
            push_force,
            max_impulse_radius,
        })
    }

    #[inline]
    pub fn spring(&self) -> f32 {
        self.spring
    }

    #[inline]
    pub fn damping(&self) -> f32 {
        self.damping
    }

    #[inline]
    pub fn push_force(&self) -> f32 {
        self.push_force
    }

    #[inline]
    pub fn max_impulse_radius(&self) -> f32 {
        self.max_impulse_radius
    }

    /// Same tuning with a different spring constant
    pub fn with_spring(self, spring: f32) -> Result<Self, TuningError> {
        Self::new(spring, self.damping, self.push_force, self.max_impulse_radius)
    }

    /// Same tuning with a different damping factor
    pub fn with_damping(self, damping: f32) -> Result<Self, TuningError> {
        Self::new(self.spring, damping, self.push_force, self.max_impulse_radius)
    }
}

/// A tuning coefficient outside its valid range
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TuningError {
    Spring(f32),
    Damping(f32),
    PushForce(f32),
    ImpulseRadius(f32),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Spring(v) => write!(f, "spring must be positive and finite, got {}", v),
            TuningError::Damping(v) => write!(f, "damping must be in [0, 1), got {}", v),
            TuningError::PushForce(v) => write!(f, "push force must be non-negative and finite, got {}", v),
            TuningError::ImpulseRadius(v) => {
                write!(f, "max impulse radius must be non-negative and finite, got {}", v)
            }
        }
    }
}

impl std::error::Error for TuningError {}
