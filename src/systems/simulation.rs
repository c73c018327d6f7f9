//! Frame simulation system
//!
//! Drives a [`World`] one frame at a time:
//! - Scripted pointer sweep → hover transitions and pointer impulses
//! - Fixed-step tick
//! - Dirty-entity collection for the renderer

use glassdrift_core::{DirtyFlags, EntityKey, Impulse, Vec3, World};

use crate::config::SimulationConfig;

/// A pointer that sweeps back and forth across the scene
///
/// Stands in for a real pointer when running headless.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSweep {
    pub from: Vec3,
    pub to: Vec3,
    /// Frames for a full there-and-back pass
    pub period: u32,
    /// Vertical wobble amplitude
    pub wobble: f32,
    /// Hit radius around an entity's current position, before scaling
    pub pick_radius: f32,
}

impl Default for PointerSweep {
    fn default() -> Self {
        Self {
            from: Vec3::new(-10.0, 0.0, 0.0),
            to: Vec3::new(10.0, 0.0, 0.0),
            period: 240,
            wobble: 0.8,
            pick_radius: 1.5,
        }
    }
}

impl PointerSweep {
    /// Pointer position on a given frame
    pub fn position_at(&self, frame: u64) -> Vec3 {
        let period = u64::from(self.period.max(1));
        let phase = (frame % period) as f32 / period as f32;
        let s = if phase < 0.5 { 2.0 * phase } else { 2.0 - 2.0 * phase };
        let mut p = self.from.lerp(self.to, s);
        p.y += self.wobble * (frame as f32 * 0.07).sin();
        p
    }

    /// The animated entity under `point`, nearest first
    ///
    /// Picking is a flat disc test in the XY plane, sized by entity scale.
    pub fn pick(&self, world: &World, point: Vec3) -> Option<EntityKey> {
        world
            .iter_with_keys()
            .filter(|(_, e)| e.is_animated())
            .filter_map(|(key, e)| {
                let t = e.transform();
                let d = t.position - point;
                let planar = (d.x * d.x + d.y * d.y).sqrt();
                (planar <= self.pick_radius * t.scale.abs()).then_some((key, planar))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(key, _)| key)
    }
}

/// Result of a simulation update
#[derive(Debug)]
pub struct SimulationResult {
    /// Index of the frame just simulated
    pub frame: u64,
    /// Where the pointer was, if a sweep is running
    pub pointer: Option<Vec3>,
    pub hovered: Option<EntityKey>,
    /// Impulse delivered this frame, if the pointer was over a shape
    pub impulse: Option<Impulse>,
    /// Entities that changed, with what changed
    pub dirty: Vec<(EntityKey, DirtyFlags)>,
}

impl SimulationResult {
    /// Whether any transform needs re-uploading
    pub fn transforms_dirty(&self) -> bool {
        self.dirty.iter().any(|(_, f)| f.contains(DirtyFlags::TRANSFORM))
    }
}

/// Manages the frame loop
pub struct SimulationSystem {
    fixed_delta: f32,
    frame: u64,
    sweep: Option<PointerSweep>,
    hovered: Option<EntityKey>,
}

impl SimulationSystem {
    /// Create a system ticking at `fixed_delta` seconds, with no pointer
    pub fn new(fixed_delta: f32) -> Self {
        Self {
            fixed_delta,
            frame: 0,
            sweep: None,
            hovered: None,
        }
    }

    /// Headless driver: configured step plus the default pointer sweep
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.fixed_delta).with_sweep(PointerSweep::default())
    }

    pub fn with_sweep(mut self, sweep: PointerSweep) -> Self {
        self.sweep = Some(sweep);
        self
    }

    /// Stop sweeping; the hovered entity, if any, is released on the next update
    pub fn stop_sweep(&mut self) {
        self.sweep = None;
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn hovered(&self) -> Option<EntityKey> {
        self.hovered
    }

    /// Run one frame
    pub fn update(&mut self, world: &mut World) -> SimulationResult {
        let frame = self.frame;

        // 1. Move the pointer and find what it is over
        let pointer = self.sweep.map(|s| s.position_at(frame));
        let hit = match (self.sweep, pointer) {
            (Some(sweep), Some(p)) => sweep.pick(world, p),
            _ => None,
        };

        // 2. Hover transitions
        if hit != self.hovered {
            if let Some(old) = self.hovered {
                world.on_pointer_leave(old);
            }
            if let Some(new) = hit {
                world.on_pointer_enter(new);
            }
            self.hovered = hit;
        }

        // 3. Push whatever is under the pointer
        let impulse = match (hit, pointer) {
            (Some(key), Some(p)) => world.on_pointer_move(key, p),
            _ => None,
        };

        // 4. Advance every body
        world.on_tick(self.fixed_delta);

        self.frame += 1;
        SimulationResult {
            frame,
            pointer,
            hovered: self.hovered,
            impulse,
            dirty: world.take_dirty(),
        }
    }

    /// Run `frames` frames, returning the last result
    pub fn run(&mut self, world: &mut World, frames: u32) -> Option<SimulationResult> {
        let mut last = None;
        for _ in 0..frames {
            last = Some(self.update(world));
        }
        last
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glassdrift_core::{DriftConfig, Entity, GeometryDescriptor, ImpulseMapper, Quat, SpringTuning, Transform3D};
    use glassdrift_geometry::Torus;

    fn ring_world(position: Vec3) -> (World, EntityKey) {
        let mut world = World::with_config(DriftConfig::default(), ImpulseMapper::seeded(3));
        let key = world.add_animated(
            Entity::with_transform(
                GeometryDescriptor::torus(Torus::default()),
                Transform3D::new(position, Quat::IDENTITY, 1.5),
            ),
            SpringTuning::default(),
        );
        world.take_dirty();
        (world, key)
    }

    #[test]
    fn test_sweep_ping_pongs() {
        let sweep = PointerSweep {
            wobble: 0.0,
            ..PointerSweep::default()
        };
        assert_eq!(sweep.position_at(0), Vec3::new(-10.0, 0.0, 0.0));
        assert_eq!(sweep.position_at(120), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(sweep.position_at(60), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(sweep.position_at(240), sweep.position_at(0));
    }

    #[test]
    fn test_pick_uses_scaled_radius() {
        let (world, key) = ring_world(Vec3::new(2.0, 0.0, 0.0));
        let sweep = PointerSweep::default();
        // 1.5 * 1.5 = 2.25 reach
        assert_eq!(sweep.pick(&world, Vec3::new(4.0, 0.0, 0.0)), Some(key));
        assert_eq!(sweep.pick(&world, Vec3::new(4.5, 0.0, 0.0)), None);
    }

    #[test]
    fn test_update_without_sweep_only_ticks() {
        let (mut world, _) = ring_world(Vec3::ZERO);
        let mut system = SimulationSystem::new(1.0 / 60.0);
        let result = system.update(&mut world);
        assert_eq!(result.frame, 0);
        assert!(result.pointer.is_none() && result.impulse.is_none());
        assert!(!result.transforms_dirty());
        assert_eq!(system.frame(), 1);
    }

    #[test]
    fn test_sweep_enters_pushes_and_leaves() {
        let (mut world, key) = ring_world(Vec3::ZERO);
        let sweep = PointerSweep {
            from: Vec3::new(-1.0, 0.0, 0.0),
            to: Vec3::new(-1.0, 0.0, 0.0),
            wobble: 0.0,
            ..PointerSweep::default()
        };
        let mut system = SimulationSystem::new(1.0 / 60.0).with_sweep(sweep);

        let result = system.update(&mut world);
        assert_eq!(result.hovered, Some(key));
        assert!(result.impulse.is_some());
        assert!(result.transforms_dirty());
        assert!(world.get_entity(key).unwrap().hover().is_hovered());

        system.stop_sweep();
        let result = system.update(&mut world);
        assert!(result.hovered.is_none());
        assert!(!world.get_entity(key).unwrap().hover().is_hovered());
    }

    #[test]
    fn test_run_settles_after_sweep() {
        let (mut world, key) = ring_world(Vec3::ZERO);
        let mut system = SimulationSystem::default();
        system.run(&mut world, 120);
        system.stop_sweep();
        let last = system.run(&mut world, 600).unwrap();
        assert_eq!(last.frame, 719);
        let (position, _) = world.pose(key).unwrap();
        assert!(position.length() < 1e-3, "still at {:?}", position);
    }
}
