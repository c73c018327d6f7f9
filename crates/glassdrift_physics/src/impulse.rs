//! Pointer contact to velocity impulse mapping

use glassdrift_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::body::AnimatedBody;
use crate::tuning::SpringTuning;

/// Default half-width of the random z-spin added to every push
pub const DEFAULT_JITTER: f32 = 0.05;

/// Extra gain of the angular response relative to the linear push
const SPIN_GAIN: f32 = 3.0;

/// Velocity change produced by one pointer contact
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Impulse {
    pub linear: Vec3,
    pub angular: Vec3,
}

impl Impulse {
    pub const ZERO: Self = Self {
        linear: Vec3::ZERO,
        angular: Vec3::ZERO,
    };

    /// Impulse for a contact at `local` (body space), before jitter
    ///
    /// The lever is clamped to the tuning's impulse radius. The push moves the
    /// body along the lever; the spin turns it about Z toward the lever and
    /// tilts it slightly.
    pub fn from_local(local: Vec3, tuning: &SpringTuning, spin_jitter: f32) -> Self {
        let lever = local.clamp_length(tuning.max_impulse_radius());
        let push = tuning.push_force();
        let spin = Vec3::new(-lever.y, lever.x, lever.z * 0.5) * (push * SPIN_GAIN);
        Self {
            linear: lever * push,
            angular: spin + Vec3::new(0.0, 0.0, spin_jitter),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.linear == Vec3::ZERO && self.angular == Vec3::ZERO
    }
}

/// Turns world-space contact points into impulses on bodies
///
/// Owns the random source for the z-spin jitter. Seed it for reproducible
/// runs, or set the jitter to zero for fully deterministic impulses.
#[derive(Clone, Debug)]
pub struct ImpulseMapper {
    rng: StdRng,
    jitter: f32,
}

impl Default for ImpulseMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpulseMapper {
    /// Mapper seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            jitter: DEFAULT_JITTER,
        }
    }

    /// Mapper with a reproducible jitter sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            jitter: DEFAULT_JITTER,
        }
    }

    /// Set the jitter half-width (negative or non-finite disables jitter)
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = if jitter.is_finite() { jitter.max(0.0) } else { 0.0 };
        self
    }

    #[inline]
    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    fn sample_jitter(&mut self) -> f32 {
        if self.jitter > 0.0 {
            self.rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0.0
        }
    }

    /// Compute the impulse for touching `body` at world `point` without applying it
    pub fn impulse_for(&mut self, body: &AnimatedBody, point: Vec3) -> Impulse {
        if !point.is_finite() {
            log::warn!("ignoring non-finite contact point {:?}", point);
            return Impulse::ZERO;
        }
        let local = body.world_to_local(point);
        let jitter = self.sample_jitter();
        Impulse::from_local(local, body.tuning(), jitter)
    }

    /// Push `body` from a contact at world `point` and return what was applied
    pub fn apply(&mut self, body: &mut AnimatedBody, point: Vec3) -> Impulse {
        let impulse = self.impulse_for(body, point);
        body.apply_impulse(&impulse);
        log::trace!("impulse {:?} from contact at {:?}", impulse, point);
        impulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glassdrift_math::Quat;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_from_local_clamps_lever() {
        let tuning = SpringTuning::default();
        let impulse = Impulse::from_local(Vec3::new(0.5, 0.0, 0.0), &tuning, 0.0);
        // 0.3 * 1.5
        assert!(vec_approx_eq(impulse.linear, Vec3::new(0.45, 0.0, 0.0)));
        // (-0, 0.3, 0) * 1.5 * 3
        assert!(vec_approx_eq(impulse.angular, Vec3::new(0.0, 1.35, 0.0)));
    }

    #[test]
    fn test_lever_never_exceeds_radius() {
        let tuning = SpringTuning::default();
        for local in [Vec3::new(10.0, -3.0, 2.0), Vec3::new(0.1, 0.1, 0.1), Vec3::new(0.0, -0.31, 0.0)] {
            let impulse = Impulse::from_local(local, &tuning, 0.0);
            let lever = impulse.linear / tuning.push_force();
            assert!(lever.length() <= tuning.max_impulse_radius() + EPSILON);
        }
    }

    #[test]
    fn test_far_contact_still_clamps_to_radius() {
        let body = AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY);
        let mut mapper = ImpulseMapper::seeded(1).with_jitter(0.0);
        let impulse = mapper.impulse_for(&body, Vec3::new(1e30, 1e30, 1e30));
        assert!((impulse.linear.length() - 0.45).abs() < EPSILON, "got {:?}", impulse.linear);
        assert!(impulse.linear.x > 0.0);
    }

    #[test]
    fn test_short_lever_is_unclamped() {
        let tuning = SpringTuning::default();
        let impulse = Impulse::from_local(Vec3::new(0.0, 0.2, 0.1), &tuning, 0.0);
        assert!(vec_approx_eq(impulse.linear, Vec3::new(0.0, 0.3, 0.15)));
        assert!(vec_approx_eq(impulse.angular, Vec3::new(-0.9, 0.0, 0.225)));
    }

    #[test]
    fn test_contact_at_origin_is_zero() {
        let body = AnimatedBody::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let mut mapper = ImpulseMapper::seeded(1).with_jitter(0.0);
        let impulse = mapper.impulse_for(&body, Vec3::new(1.0, 2.0, 3.0));
        assert!(impulse.is_zero());
    }

    #[test]
    fn test_contact_uses_body_frame() {
        // Rotated 90 degrees about Z: a world +Y contact is a local +X contact
        let body = AnimatedBody::new(Vec3::ZERO, Quat::from_axis_angle(Vec3::Z, FRAC_PI_2));
        let mut mapper = ImpulseMapper::seeded(1).with_jitter(0.0);
        let impulse = mapper.impulse_for(&body, Vec3::new(0.0, 0.2, 0.0));
        assert!(vec_approx_eq(impulse.linear, Vec3::new(0.3, 0.0, 0.0)), "got {:?}", impulse.linear);
    }

    #[test]
    fn test_scale_shrinks_lever() {
        let body = AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY).with_scale(2.0);
        let mut mapper = ImpulseMapper::seeded(1).with_jitter(0.0);
        let impulse = mapper.impulse_for(&body, Vec3::new(0.4, 0.0, 0.0));
        assert!(vec_approx_eq(impulse.linear, Vec3::new(0.3, 0.0, 0.0)));
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let body = AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY);
        let mut mapper = ImpulseMapper::seeded(42);
        for _ in 0..200 {
            let impulse = mapper.impulse_for(&body, Vec3::ZERO);
            assert_eq!(impulse.linear, Vec3::ZERO);
            assert!(impulse.angular.z.abs() <= DEFAULT_JITTER);
        }
    }

    #[test]
    fn test_seeded_mappers_agree() {
        let body = AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY);
        let mut a = ImpulseMapper::seeded(7);
        let mut b = ImpulseMapper::seeded(7);
        for _ in 0..10 {
            let point = Vec3::new(0.1, 0.2, 0.0);
            assert_eq!(a.impulse_for(&body, point), b.impulse_for(&body, point));
        }
    }

    #[test]
    fn test_with_jitter_sanitizes() {
        assert_eq!(ImpulseMapper::seeded(0).with_jitter(-1.0).jitter(), 0.0);
        assert_eq!(ImpulseMapper::seeded(0).with_jitter(f32::NAN).jitter(), 0.0);
        assert_eq!(ImpulseMapper::seeded(0).with_jitter(0.2).jitter(), 0.2);
    }

    #[test]
    fn test_apply_accumulates() {
        let mut body = AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY);
        let mut mapper = ImpulseMapper::seeded(3).with_jitter(0.0);
        mapper.apply(&mut body, Vec3::new(1.0, 0.0, 0.0));
        mapper.apply(&mut body, Vec3::new(1.0, 0.0, 0.0));
        assert!(vec_approx_eq(body.linear_velocity(), Vec3::new(0.9, 0.0, 0.0)));
    }

    #[test]
    fn test_non_finite_point_is_ignored() {
        let mut body = AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY);
        let mut mapper = ImpulseMapper::seeded(3);
        let impulse = mapper.apply(&mut body, Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(impulse.is_zero());
        assert_eq!(body.linear_velocity(), Vec3::ZERO);
    }
}
