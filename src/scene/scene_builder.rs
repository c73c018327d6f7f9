//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for laying out animated shapes in a [`World`].

use std::f32::consts::PI;

use glassdrift_core::{Entity, GeometryDescriptor, Transform3D, Vec3, World};
use glassdrift_geometry::{CubeFrame, SpiralTubeParams, Torus, TriangleRingParams};
use glassdrift_physics::SpringTuning;

use crate::config::{AppConfig, ConfigError};

/// Where one of the standard shapes rests
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub name: &'static str,
    pub position: Vec3,
    /// XYZ Euler angles in radians
    pub rotation: Vec3,
    pub scale: f32,
}

impl Placement {
    pub fn transform(&self) -> Transform3D {
        Transform3D::from_euler(self.position, self.rotation, self.scale)
    }
}

pub const CUBE_FRAME: Placement = Placement {
    name: "cube_frame",
    position: Vec3::new(-7.25, 0.0, 0.0),
    rotation: Vec3::new(PI / 5.0, PI / 4.0, 0.0),
    scale: 1.4,
};

pub const GLASS_RING: Placement = Placement {
    name: "glass_ring",
    position: Vec3::new(-2.25, 0.0, 0.0),
    rotation: Vec3::new(0.0, 0.0, PI / 4.0),
    scale: 1.5,
};

pub const SPIRAL_HELIX: Placement = Placement {
    name: "spiral_helix",
    position: Vec3::new(2.75, 0.0, 0.0),
    rotation: Vec3::new(0.0, 0.0, -PI / 6.0),
    scale: 1.5,
};

pub const TRIANGLE_RING: Placement = Placement {
    name: "triangle_ring",
    position: Vec3::new(7.75, 0.0, 0.0),
    rotation: Vec3::new(0.0, 0.0, -PI / 12.0),
    scale: 1.5,
};

/// Builder for constructing scenes of drifting shapes
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::new()
///     .add_glass_ring(Torus::default())
///     .add_shape(GeometryDescriptor::torus(Torus::new(0.5, 0.1)), Transform3D::identity(), "small")
///     .build();
/// ```
pub struct SceneBuilder {
    world: World,
    tuning: SpringTuning,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    /// Create a new scene builder with default tuning
    pub fn new() -> Self {
        Self::with_world(World::new())
    }

    /// Build into an existing world
    pub fn with_world(world: World) -> Self {
        Self {
            world,
            tuning: SpringTuning::default(),
        }
    }

    /// A builder whose world and tuning come from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let tuning = config.spring.to_tuning()?;
        let world = World::with_config(config.drift_config(), config.impulse_mapper());
        Ok(Self::with_world(world).with_tuning(tuning))
    }

    /// The standard four-shape scene, with generator parameters from `config`
    pub fn standard(config: &AppConfig) -> Result<World, ConfigError> {
        let geometry = &config.geometry;
        let world = Self::from_config(config)?
            .add_cube_frame(&geometry.cube_frame)
            .add_glass_ring(geometry.torus)
            .add_spiral_helix(&geometry.spiral)
            .add_triangle_ring(&geometry.triangle_ring)
            .build();
        log::info!("Composed scene with {} entities", world.entity_count());
        Ok(world)
    }

    /// Tuning applied to shapes added after this call
    pub fn with_tuning(mut self, tuning: SpringTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Add an animated shape resting at `transform`
    pub fn add_shape(mut self, geometry: GeometryDescriptor, transform: Transform3D, name: &str) -> Self {
        let kind = geometry.kind();
        let entity = Entity::with_transform(geometry, transform).with_name(name);
        let key = self.world.add_animated(entity, self.tuning);
        log::debug!("{} '{}' at {:?} ({:?})", kind, name, transform.position, key);
        self
    }

    fn add_placed(self, geometry: GeometryDescriptor, placement: &Placement) -> Self {
        self.add_shape(geometry, placement.transform(), placement.name)
    }

    /// Add the hollow cube frame on the far left
    pub fn add_cube_frame(self, frame: &CubeFrame) -> Self {
        self.add_placed(GeometryDescriptor::cube_frame(frame), &CUBE_FRAME)
    }

    /// Add the glass torus
    pub fn add_glass_ring(self, torus: Torus) -> Self {
        self.add_placed(GeometryDescriptor::torus(torus), &GLASS_RING)
    }

    /// Add the spiral tube
    pub fn add_spiral_helix(self, params: &SpiralTubeParams) -> Self {
        self.add_placed(GeometryDescriptor::spiral_tube(params), &SPIRAL_HELIX)
    }

    /// Add the rounded triangular ring on the far right
    pub fn add_triangle_ring(self, params: &TriangleRingParams) -> Self {
        self.add_placed(GeometryDescriptor::triangle_ring(params), &TRIANGLE_RING)
    }

    /// Add a static entity; it never moves
    pub fn add_entity(mut self, entity: Entity) -> Self {
        self.world.add_entity(entity);
        self
    }

    /// Build the scene and return the configured World
    pub fn build(self) -> World {
        self.world
    }
}
