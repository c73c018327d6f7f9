//! Animated bodies: a fixed rest pose plus a live, spring-driven pose

use std::f32::consts::{PI, TAU};

use crate::impulse::Impulse;
use crate::tuning::SpringTuning;
use glassdrift_math::{Quat, Vec3};
use slotmap::new_key_type;

// Define generational key type for animated bodies
new_key_type! {
    /// Key to an animated body in the drift world
    ///
    /// Uses generational indexing, so a key to a removed body returns None
    /// instead of aliasing whatever later reuses its slot.
    pub struct BodyKey;
}

/// Below this `sin(angle / 2)` the rotation axis is numerically meaningless
const AXIS_EPSILON: f32 = 1e-3;

/// Axis used when the orientation error is too small to define one
const FALLBACK_AXIS: Vec3 = Vec3::X;

/// A body that springs back to its rest pose
///
/// The rest pose is fixed at construction. The live pose only changes through
/// [`AnimatedBody::step`]; pointer contact only ever adds velocity.
#[derive(Clone, Debug)]
pub struct AnimatedBody {
    rest_position: Vec3,
    rest_orientation: Quat,
    position: Vec3,
    orientation: Quat,
    /// Units per second
    linear_velocity: Vec3,
    /// Axis scaled by rotation rate in radians per second
    angular_velocity: Vec3,
    scale: f32,
    tuning: SpringTuning,
}

impl AnimatedBody {
    /// Create a body resting at the given pose
    ///
    /// A non-finite position falls back to the origin and a degenerate
    /// orientation to the identity.
    pub fn new(rest_position: Vec3, rest_orientation: Quat) -> Self {
        let rest_position = if rest_position.is_finite() {
            rest_position
        } else {
            log::warn!("non-finite rest position {:?}, using origin", rest_position);
            Vec3::ZERO
        };
        let rest_orientation = rest_orientation.normalize();
        Self {
            rest_position,
            rest_orientation,
            position: rest_position,
            orientation: rest_orientation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            scale: 1.0,
            tuning: SpringTuning::default(),
        }
    }

    /// Set the uniform scale used to map contact points into local space
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_tuning(mut self, tuning: SpringTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Start away from rest; the body will drift back once stepped
    pub fn with_pose(mut self, position: Vec3, orientation: Quat) -> Self {
        if position.is_finite() {
            self.position = position;
        }
        self.orientation = orientation.normalize();
        self
    }

    #[inline]
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    #[inline]
    pub fn rest_orientation(&self) -> Quat {
        self.rest_orientation
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    #[inline]
    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    #[inline]
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn tuning(&self) -> &SpringTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: SpringTuning) {
        self.tuning = tuning;
    }

    /// Scale actually used for local-space mapping (zero or non-finite counts as 1)
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale != 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Map a world-space point into the body's local frame
    pub fn world_to_local(&self, point: Vec3) -> Vec3 {
        self.orientation.inverse().rotate(point - self.position) / self.effective_scale()
    }

    /// Add an impulse to the body's velocities
    ///
    /// Non-finite impulses are dropped.
    pub fn apply_impulse(&mut self, impulse: &Impulse) {
        if !(impulse.linear.is_finite() && impulse.angular.is_finite()) {
            log::warn!("dropping non-finite impulse {:?}", impulse);
            return;
        }
        self.linear_velocity += impulse.linear;
        self.angular_velocity += impulse.angular;
    }

    /// Advance one spring-damper step of `dt` seconds
    ///
    /// Returns whether the pose changed. Non-finite or non-positive `dt` is
    /// ignored.
    pub fn step(&mut self, dt: f32) -> bool {
        if !(dt.is_finite() && dt > 0.0) {
            return false;
        }
        let spring = self.tuning.spring();
        let damping = self.tuning.damping();
        let before = (self.position, self.orientation);

        // Position channel
        let error = self.rest_position - self.position;
        self.linear_velocity += error * (spring * dt);
        self.linear_velocity *= damping;
        self.position += self.linear_velocity * dt;

        // Orientation channel
        let (axis, angle) = rotation_to_rest(self.rest_orientation, self.orientation);
        self.angular_velocity += axis * (angle * spring * dt);
        self.angular_velocity *= damping;

        let rate = self.angular_velocity.length();
        if rate > f32::EPSILON {
            let delta = Quat::from_axis_angle(self.angular_velocity / rate, rate * dt);
            self.orientation = (delta * self.orientation).normalize();
        }

        if !self.state_is_finite() {
            log::warn!("animated body diverged, snapping back to rest");
            self.reset();
        }

        before != (self.position, self.orientation)
    }

    /// Snap to the rest pose and stop all motion
    pub fn reset(&mut self) {
        self.position = self.rest_position;
        self.orientation = self.rest_orientation;
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    fn state_is_finite(&self) -> bool {
        self.position.is_finite()
            && self.orientation.is_finite()
            && self.linear_velocity.is_finite()
            && self.angular_velocity.is_finite()
    }

    /// Linear speed in units per second
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }

    /// Rotation rate in radians per second
    pub fn angular_speed(&self) -> f32 {
        self.angular_velocity.length()
    }

    /// Distance from the rest position
    pub fn position_error(&self) -> f32 {
        self.position.distance(self.rest_position)
    }

    /// Angle in radians between the live and rest orientations
    pub fn orientation_error(&self) -> f32 {
        self.orientation.angle_to(&self.rest_orientation)
    }

    /// True when the pose is within `tolerance` of rest and motion has died down
    pub fn is_settled(&self, tolerance: f32) -> bool {
        self.position_error() <= tolerance
            && self.orientation_error() <= tolerance
            && self.speed() <= tolerance
            && self.angular_speed() <= tolerance
    }
}

/// Axis and signed angle of the rotation taking `current` to `rest`
///
/// The angle is wrapped into `(-π, π]`. When the rotation is too small for a
/// stable axis, [`FALLBACK_AXIS`] is returned with the (tiny) angle.
fn rotation_to_rest(rest: Quat, current: Quat) -> (Vec3, f32) {
    let diff = (rest * current.inverse()).normalize();
    let w = diff.w.clamp(-1.0, 1.0);
    let s = diff.xyz().length();

    // Same as 2·acos(w) for a unit quaternion, but exact near the identity
    let mut angle = 2.0 * s.atan2(w);
    if angle > PI {
        angle -= TAU;
    }

    let axis = if s < AXIS_EPSILON {
        FALLBACK_AXIS
    } else {
        diff.xyz() / s
    };
    (axis, angle)
}
