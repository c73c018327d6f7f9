//! Entities: named, positioned shapes that may be animated
//!
//! An Entity pairs a geometry descriptor with a transform, and optionally a
//! body in the drift world that animates that transform.

use bitflags::bitflags;
use glassdrift_geometry::GeometryDescriptor;
use glassdrift_math::{Quat, Vec3};
use glassdrift_physics::BodyKey;
use serde::{Serialize, Deserialize};
use crate::Transform3D;

bitflags! {
    /// Flags indicating which parts of an entity changed since the host last looked
    ///
    /// Lets the renderer skip re-uploading settled objects.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Geometry needs building
        ///
        /// Descriptors never change after creation, so this is only raised
        /// once, as part of `ALL` on a freshly added entity.
        const MESH = 1 << 1;
        /// Hover state flipped
        const HOVER = 1 << 2;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::HOVER.bits();
    }
}

/// Whether the pointer is over an entity
///
/// Purely cosmetic; hovering has no effect on motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

impl HoverState {
    #[inline]
    pub fn is_hovered(&self) -> bool {
        matches!(self, HoverState::Hovered)
    }
}

/// An object in the world
///
/// The transform is read-only outside this crate: for animated entities the
/// drift body owns the live pose and the world copies it back after each tick.
pub struct Entity {
    name: Option<String>,
    transform: Transform3D,
    geometry: GeometryDescriptor,
    body: Option<BodyKey>,
    hover: HoverState,
    dirty: DirtyFlags,
}

impl Entity {
    /// Create a new entity at the origin
    pub fn new(geometry: GeometryDescriptor) -> Self {
        Self::with_transform(geometry, Transform3D::identity())
    }

    /// Create an entity resting at `transform`
    pub fn with_transform(geometry: GeometryDescriptor, transform: Transform3D) -> Self {
        Self {
            name: None,
            transform,
            geometry,
            body: None,
            hover: HoverState::Idle,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn with_body(mut self, key: BodyKey) -> Self {
        self.body = Some(key);
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Transform as of the last tick
    #[inline]
    pub fn transform(&self) -> Transform3D {
        self.transform
    }

    /// The drift body animating this entity, if any
    #[inline]
    pub fn body(&self) -> Option<BodyKey> {
        self.body
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.body.is_some()
    }

    /// The immutable shape data
    #[inline]
    pub fn geometry(&self) -> &GeometryDescriptor {
        &self.geometry
    }

    #[inline]
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Change hover state, marking the entity dirty if it flipped
    pub fn set_hover(&mut self, hover: HoverState) -> bool {
        if self.hover == hover {
            return false;
        }
        self.hover = hover;
        self.mark_dirty(DirtyFlags::HOVER);
        true
    }

    // --- Dirty tracking methods ---

    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Copy a pose written by the integrator, marking the transform dirty
    pub(crate) fn sync_pose(&mut self, position: Vec3, rotation: Quat) {
        self.transform.position = position;
        self.transform.rotation = rotation;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glassdrift_geometry::Torus;

    fn make_entity() -> Entity {
        Entity::new(GeometryDescriptor::torus(Torus::default()))
    }

    #[test]
    fn test_dirty_flags_all() {
        let all = DirtyFlags::ALL;
        assert!(all.contains(DirtyFlags::TRANSFORM));
        assert!(all.contains(DirtyFlags::MESH));
        assert!(all.contains(DirtyFlags::HOVER));
    }

    #[test]
    fn test_new_entity_is_dirty() {
        let entity = make_entity();
        assert!(entity.is_dirty());
        assert_eq!(entity.dirty_flags(), DirtyFlags::ALL);
        assert_eq!(entity.hover(), HoverState::Idle);
        assert!(entity.body().is_none());
        assert!(!entity.is_animated());
    }

    #[test]
    fn test_clear_and_mark_dirty() {
        let mut entity = make_entity();
        entity.clear_dirty();
        assert!(!entity.is_dirty());

        entity.mark_dirty(DirtyFlags::TRANSFORM);
        entity.mark_dirty(DirtyFlags::HOVER);
        assert_eq!(entity.dirty_flags(), DirtyFlags::TRANSFORM | DirtyFlags::HOVER);
    }

    #[test]
    fn test_sync_pose_marks_dirty_and_keeps_scale() {
        let mut entity = Entity::with_transform(
            GeometryDescriptor::torus(Torus::default()),
            Transform3D::new(Vec3::ZERO, Quat::IDENTITY, 1.5),
        );
        entity.clear_dirty();
        entity.sync_pose(Vec3::new(1.0, 2.0, 3.0), Quat::from_axis_angle(Vec3::Z, 0.5));
        assert_eq!(entity.dirty_flags(), DirtyFlags::TRANSFORM);
        assert_eq!(entity.transform().position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(entity.transform().scale, 1.5);
    }

    #[test]
    fn test_hover_only_dirty_on_change() {
        let mut entity = make_entity();
        entity.clear_dirty();

        assert!(!entity.set_hover(HoverState::Idle));
        assert!(!entity.is_dirty());

        assert!(entity.set_hover(HoverState::Hovered));
        assert!(entity.hover().is_hovered());
        assert_eq!(entity.dirty_flags(), DirtyFlags::HOVER);
    }

    #[test]
    fn test_with_name() {
        let entity = make_entity().with_name("glass_ring");
        assert_eq!(entity.name(), Some("glass_ring"));
    }
}
