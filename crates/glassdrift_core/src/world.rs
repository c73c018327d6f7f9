//! World container for entities
//!
//! The World owns every entity and the drift world that animates them, and is
//! the surface a host drives: one tick per frame, pointer events in between,
//! and pose/geometry queries for drawing.

use std::collections::{HashMap, HashSet};

use crate::{DirtyFlags, Entity, HoverState, Transform3D};
use glassdrift_geometry::GeometryDescriptor;
use glassdrift_math::{Quat, Vec3};
use glassdrift_physics::{AnimatedBody, BodyKey, DriftConfig, DriftWorld, Impulse, ImpulseMapper, SpringTuning};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key to an entity in the world
    ///
    /// Keys of removed entities never alias later entities.
    pub struct EntityKey;
}

/// The world containing all entities
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
    /// Name index for `get_by_name`
    names: HashMap<String, EntityKey>,
    drift: DriftWorld,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::with_drift(DriftWorld::new())
    }

    /// Create a world around an existing drift world
    pub fn with_drift(drift: DriftWorld) -> Self {
        Self {
            entities: SlotMap::with_key(),
            names: HashMap::new(),
            drift,
        }
    }

    /// Create a world with the given frame-time limit and impulse mapper
    pub fn with_config(config: DriftConfig, mapper: ImpulseMapper) -> Self {
        Self::with_drift(DriftWorld::with_config(config).with_mapper(mapper))
    }

    pub fn drift(&self) -> &DriftWorld {
        &self.drift
    }

    pub fn drift_mut(&mut self) -> &mut DriftWorld {
        &mut self.drift
    }

    /// Add an entity to the world, returning its key
    ///
    /// A name already in use is re-pointed at the new entity.
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        let name = entity.name().map(str::to_owned);
        let key = self.entities.insert(entity);
        if let Some(name) = name {
            if let Some(previous) = self.names.insert(name.clone(), key) {
                log::warn!("entity name {:?} reassigned from {:?} to {:?}", name, previous, key);
            }
        }
        key
    }

    /// Add an entity animated around its current transform
    ///
    /// The entity's transform becomes the body's rest pose, and its scale is
    /// used to map pointer contacts into local space.
    pub fn add_animated(&mut self, entity: Entity, tuning: SpringTuning) -> EntityKey {
        let t = entity.transform();
        let body = AnimatedBody::new(t.position, t.rotation)
            .with_scale(t.scale)
            .with_tuning(tuning);
        let body_key = self.drift.add_body(body);
        let key = self.add_entity(entity.with_body(body_key));
        log::debug!("added animated entity {:?} with body {:?}", key, body_key);
        key
    }

    /// Remove an entity and its body; it stops evolving immediately
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let entity = self.entities.remove(key)?;
        if let Some(body) = entity.body() {
            self.drift.remove_body(body);
        }
        if let Some(name) = entity.name() {
            if self.names.get(name) == Some(&key) {
                self.names.remove(name);
            }
        }
        log::debug!("removed entity {:?}", key);
        Some(entity)
    }

    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Look up an entity by name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        let key = *self.names.get(name)?;
        self.entities.get(key).map(|e| (key, e))
    }

    /// The drift body animating an entity, if any
    pub fn body(&self, key: EntityKey) -> Option<&AnimatedBody> {
        let body = self.entities.get(key)?.body()?;
        self.drift.get_body(body)
    }

    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate over keys and entities
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Advance the simulation by one frame and sync entity transforms
    ///
    /// Entities whose pose changed are marked with [`DirtyFlags::TRANSFORM`].
    pub fn on_tick(&mut self, delta_seconds: f32) {
        let moved: HashSet<BodyKey> = self.drift.step(delta_seconds).into_iter().collect();
        if moved.is_empty() {
            return;
        }

        for entity in self.entities.values_mut() {
            let Some(body_key) = entity.body().filter(|k| moved.contains(k)) else {
                continue;
            };
            if let Some(body) = self.drift.get_body(body_key) {
                entity.sync_pose(body.position(), body.orientation());
            }
        }
    }

    /// The pointer moved across an entity at world `point`
    ///
    /// Returns the impulse applied, or None if the entity is unknown or not
    /// animated. The pose only changes on the next tick.
    pub fn on_pointer_move(&mut self, key: EntityKey, point: Vec3) -> Option<Impulse> {
        let body = self.entities.get(key)?.body()?;
        self.drift.apply_pointer(body, point)
    }

    /// The pointer entered an entity. Returns false for an unknown key.
    pub fn on_pointer_enter(&mut self, key: EntityKey) -> bool {
        self.set_hover(key, HoverState::Hovered)
    }

    /// The pointer left an entity. Returns false for an unknown key.
    pub fn on_pointer_leave(&mut self, key: EntityKey) -> bool {
        self.set_hover(key, HoverState::Idle)
    }

    fn set_hover(&mut self, key: EntityKey, hover: HoverState) -> bool {
        match self.entities.get_mut(key) {
            Some(entity) => {
                entity.set_hover(hover);
                true
            }
            None => false,
        }
    }

    /// Current position and orientation of an entity
    ///
    /// Animated entities report their body's pose; static ones their transform.
    pub fn pose(&self, key: EntityKey) -> Option<(Vec3, Quat)> {
        let entity = self.entities.get(key)?;
        match entity.body().and_then(|b| self.drift.get_body(b)) {
            Some(body) => Some((body.position(), body.orientation())),
            None => {
                let t = entity.transform();
                Some((t.position, t.rotation))
            }
        }
    }

    /// Current full transform (pose plus scale) of an entity
    pub fn transform(&self, key: EntityKey) -> Option<Transform3D> {
        let scale = self.entities.get(key)?.transform().scale;
        let (position, rotation) = self.pose(key)?;
        Some(Transform3D::new(position, rotation, scale))
    }

    pub fn geometry(&self, key: EntityKey) -> Option<&GeometryDescriptor> {
        self.entities.get(key).map(Entity::geometry)
    }

    /// Collect and clear the dirty flags of every changed entity
    pub fn take_dirty(&mut self) -> Vec<(EntityKey, DirtyFlags)> {
        self.entities
            .iter_mut()
            .filter(|(_, e)| e.is_dirty())
            .map(|(key, e)| {
                let flags = e.dirty_flags();
                e.clear_dirty();
                (key, flags)
            })
            .collect()
    }

    /// True when every animated entity is within `tolerance` of rest
    pub fn is_settled(&self, tolerance: f32) -> bool {
        self.drift.is_settled(tolerance)
    }

    /// Remove everything
    pub fn clear(&mut self) {
        let keys: Vec<EntityKey> = self.entities.keys().collect();
        for key in keys {
            self.remove_entity(key);
        }
    }
}
