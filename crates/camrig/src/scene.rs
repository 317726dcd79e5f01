//! Scene access for tracking controllers
//!
//! Trackers never hold on to engine objects. They keep an [`EntityRef`] and
//! ask a [`SpatialQuery`] for its position and bounds when they need them.

use camrig_core::Bounds2;
use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque reference to an entity owned by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRef(pub u64);

/// Which bounds of an entity contribute to tracking
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsSource {
    /// Only the entity position
    #[default]
    None,
    /// Renderer bounds
    Renderer,
    /// Collider bounds
    Collider,
    /// Renderer and collider bounds
    Both,
}

impl BoundsSource {
    pub fn uses_renderer(&self) -> bool {
        matches!(self, BoundsSource::Renderer | BoundsSource::Both)
    }

    pub fn uses_collider(&self) -> bool {
        matches!(self, BoundsSource::Collider | BoundsSource::Both)
    }
}

/// Read-only spatial queries against the host scene
pub trait SpatialQuery {
    /// World position, `None` if the entity no longer exists
    fn position(&self, entity: EntityRef) -> Option<Vec2>;

    /// World-space renderer bounds, if the entity has a renderer
    fn renderer_bounds(&self, entity: EntityRef) -> Option<Bounds2> {
        let _ = entity;
        None
    }

    /// World-space collider bounds, if the entity has a collider
    fn collider_bounds(&self, entity: EntityRef) -> Option<Bounds2> {
        let _ = entity;
        None
    }
}

/// The empty scene
impl SpatialQuery for () {
    fn position(&self, _entity: EntityRef) -> Option<Vec2> {
        None
    }
}

/// Entity data held by [`StaticScene`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneEntity {
    pub position: Vec2,
    /// World-space renderer bounds
    pub renderer: Option<Bounds2>,
    /// World-space collider bounds
    pub collider: Option<Bounds2>,
}

impl SceneEntity {
    /// Entity at `position` without renderer or collider
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Attach renderer bounds of `size` centered on the entity
    pub fn with_renderer(mut self, size: Vec2) -> Self {
        self.renderer = Some(Bounds2::from_center_size(self.position, size));
        self
    }

    /// Attach collider bounds of `size` centered on the entity
    pub fn with_collider(mut self, size: Vec2) -> Self {
        self.collider = Some(Bounds2::from_center_size(self.position, size));
        self
    }
}

/// Hash map backed scene for hosts without their own spatial index, and for tests
#[derive(Clone, Debug, Default)]
pub struct StaticScene {
    entities: FxHashMap<EntityRef, SceneEntity>,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entity
    pub fn insert(&mut self, entity: EntityRef, data: SceneEntity) {
        self.entities.insert(entity, data);
    }

    /// Insert an entity (builder pattern)
    pub fn with(mut self, entity: EntityRef, data: SceneEntity) -> Self {
        self.insert(entity, data);
        self
    }

    /// Move an entity, carrying its bounds along
    ///
    /// Returns false if the entity is unknown.
    pub fn set_position(&mut self, entity: EntityRef, position: Vec2) -> bool {
        let Some(data) = self.entities.get_mut(&entity) else {
            return false;
        };
        let offset = position - data.position;
        data.position = position;
        data.renderer = data.renderer.map(|bounds| bounds.translated(offset));
        data.collider = data.collider.map(|bounds| bounds.translated(offset));
        true
    }

    pub fn remove(&mut self, entity: EntityRef) -> Option<SceneEntity> {
        self.entities.remove(&entity)
    }

    pub fn get(&self, entity: EntityRef) -> Option<&SceneEntity> {
        self.entities.get(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl SpatialQuery for StaticScene {
    fn position(&self, entity: EntityRef) -> Option<Vec2> {
        self.entities.get(&entity).map(|data| data.position)
    }

    fn renderer_bounds(&self, entity: EntityRef) -> Option<Bounds2> {
        self.entities.get(&entity).and_then(|data| data.renderer)
    }

    fn collider_bounds(&self, entity: EntityRef) -> Option<Bounds2> {
        self.entities.get(&entity).and_then(|data| data.collider)
    }
}
