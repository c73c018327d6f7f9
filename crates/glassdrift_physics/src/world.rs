//! Drift world: owns every animated body and advances them together

use crate::body::{AnimatedBody, BodyKey};
use crate::impulse::{Impulse, ImpulseMapper};
use glassdrift_math::Vec3;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

/// Configuration for the drift simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Longest step a single tick may take, in seconds
    ///
    /// Longer frames (a stalled tab, a debugger pause) are shortened to this
    /// so the explicit integrator stays stable.
    pub max_delta: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self { max_delta: 0.1 }
    }
}

impl DriftConfig {
    pub fn new(max_delta: f32) -> Self {
        Self { max_delta }
    }

    /// The step actually taken for a frame of `dt` seconds, if any
    pub fn clamp_delta(&self, dt: f32) -> Option<f32> {
        if !(dt.is_finite() && dt > 0.0) {
            return None;
        }
        if self.max_delta.is_finite() && self.max_delta > 0.0 {
            Some(dt.min(self.max_delta))
        } else {
            Some(dt)
        }
    }
}

/// The drift world containing all animated bodies
pub struct DriftWorld {
    /// All bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, AnimatedBody>,
    mapper: ImpulseMapper,
    pub config: DriftConfig,
}

impl Default for DriftWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl DriftWorld {
    /// Create a world with default configuration and an entropy-seeded mapper
    pub fn new() -> Self {
        Self::with_config(DriftConfig::default())
    }

    pub fn with_config(config: DriftConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            mapper: ImpulseMapper::new(),
            config,
        }
    }

    /// Replace the impulse mapper (for a fixed seed or custom jitter)
    pub fn with_mapper(mut self, mapper: ImpulseMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn mapper(&self) -> &ImpulseMapper {
        &self.mapper
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: AnimatedBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<AnimatedBody> {
        self.bodies.remove(key)
    }

    pub fn get_body(&self, key: BodyKey) -> Option<&AnimatedBody> {
        self.bodies.get(key)
    }

    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut AnimatedBody> {
        self.bodies.get_mut(key)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &AnimatedBody)> {
        self.bodies.iter()
    }

    /// Advance every body by one frame of `dt` seconds
    ///
    /// `dt` is clamped to `config.max_delta`; non-finite or non-positive
    /// frames are skipped. Returns the keys of bodies whose pose changed.
    pub fn step(&mut self, dt: f32) -> Vec<BodyKey> {
        let Some(dt) = self.config.clamp_delta(dt) else {
            log::warn!("skipping tick with invalid delta {}", dt);
            return Vec::new();
        };

        self.bodies
            .iter_mut()
            .filter_map(|(key, body)| body.step(dt).then_some(key))
            .collect()
    }

    /// Push a body from a pointer contact at world `point`
    ///
    /// Returns the applied impulse, or None for an unknown key.
    pub fn apply_pointer(&mut self, key: BodyKey, point: Vec3) -> Option<Impulse> {
        let body = self.bodies.get_mut(key)?;
        Some(self.mapper.apply(body, point))
    }

    /// True when every body is within `tolerance` of rest
    pub fn is_settled(&self, tolerance: f32) -> bool {
        self.bodies.values().all(|b| b.is_settled(tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glassdrift_math::Quat;

    const DT: f32 = 1.0 / 60.0;

    fn deterministic_world() -> DriftWorld {
        DriftWorld::new().with_mapper(ImpulseMapper::seeded(0).with_jitter(0.0))
    }

    #[test]
    fn test_drift_config_default() {
        assert_eq!(DriftConfig::default().max_delta, 0.1);
    }

    #[test]
    fn test_clamp_delta() {
        let config = DriftConfig::default();
        assert_eq!(config.clamp_delta(DT), Some(DT));
        assert_eq!(config.clamp_delta(2.0), Some(0.1));
        assert_eq!(config.clamp_delta(0.0), None);
        assert_eq!(config.clamp_delta(-1.0), None);
        assert_eq!(config.clamp_delta(f32::NAN), None);
        assert_eq!(DriftConfig::new(0.0).clamp_delta(2.0), Some(2.0));
    }

    #[test]
    fn test_world_add_remove_body() {
        let mut world = deterministic_world();
        let key = world.add_body(AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY));
        assert_eq!(world.body_count(), 1);
        assert!(world.remove_body(key).is_some());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = deterministic_world();
        let key = world.add_body(AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY));
        world.remove_body(key);
        let _other = world.add_body(AnimatedBody::new(Vec3::X, Quat::IDENTITY));

        assert!(world.get_body(key).is_none());
        assert!(world.apply_pointer(key, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_step_reports_moving_bodies() {
        let mut world = deterministic_world();
        let resting = world.add_body(AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY));
        let pushed = world.add_body(AnimatedBody::new(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY));

        world.apply_pointer(pushed, Vec3::new(5.2, 0.0, 0.0));
        let moved = world.step(DT);
        assert_eq!(moved, vec![pushed]);
        assert!(!moved.contains(&resting));
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clamped = deterministic_world();
        let a = clamped.add_body(AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY));
        clamped.apply_pointer(a, Vec3::new(0.3, 0.0, 0.0));
        clamped.step(5.0);

        let mut reference = deterministic_world();
        let b = reference.add_body(AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY));
        reference.apply_pointer(b, Vec3::new(0.3, 0.0, 0.0));
        reference.step(0.1);

        assert_eq!(clamped.get_body(a).unwrap().position(), reference.get_body(b).unwrap().position());
    }

    #[test]
    fn test_invalid_delta_moves_nothing() {
        let mut world = deterministic_world();
        let key = world.add_body(AnimatedBody::new(Vec3::ZERO, Quat::IDENTITY));
        world.apply_pointer(key, Vec3::new(0.3, 0.0, 0.0));
        assert!(world.step(f32::NAN).is_empty());
        assert!(world.step(-DT).is_empty());
        assert_eq!(world.get_body(key).unwrap().position(), Vec3::ZERO);
    }

    #[test]
    fn test_repeated_impulses_stay_bounded() {
        let mut world = DriftWorld::new().with_mapper(ImpulseMapper::seeded(9));
        let key = world.add_body(AnimatedBody::new(Vec3::ZERO, Quat::from_euler_xyz(0.2, 0.4, 0.0)));

        // Hammer the body every frame for two seconds
        for i in 0..120 {
            let angle = i as f32 * 0.3;
            world.apply_pointer(key, Vec3::new(angle.cos(), angle.sin(), 0.2));
            world.step(DT);
            let body = world.get_body(key).unwrap();
            assert!(body.position().is_finite());
            assert!(body.position_error() < 2.0);
        }

        // Then let it ring down
        let window_peak = |world: &mut DriftWorld| {
            (0..120)
                .map(|_| {
                    world.step(DT);
                    world.get_body(key).unwrap().speed()
                })
                .fold(0.0_f32, f32::max)
        };
        let first = window_peak(&mut world);
        let second = window_peak(&mut world);
        let third = window_peak(&mut world);
        assert!(second < first);
        assert!(third < second);
        assert!(world.is_settled(1e-2));
    }
}
