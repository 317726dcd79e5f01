//! Keeping a set of entities in view
//!
//! The tracker unions the bounds of every tracked entity, pads the result
//! and picks the smallest view of the camera's aspect that covers it. With
//! prediction enabled each entity's bounds are shifted along its last
//! observed velocity first, so the camera leads fast movers.

use std::any::Any;

use camrig_core::{Bounds2, CameraState, CameraStateClamp};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::controller::{CameraController, ComputeContext, TickContext};
use crate::scene::{BoundsSource, EntityRef, SpatialQuery};

/// Movement prediction for [`Tracker`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionSettings {
    /// How far ahead to extrapolate, in seconds
    pub time: f32,
    /// Also keep the current bounds in view, not just the predicted ones
    pub enforce_current_bounds: bool,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            time: 0.1,
            enforce_current_bounds: true,
        }
    }
}

/// Settings for [`Tracker`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Added to the total width and height of the tracked bounds
    pub padding: f32,
    /// `None` disables prediction
    pub prediction: Option<PredictionSettings>,
    pub clamp: CameraStateClamp,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            padding: 1.0,
            prediction: None,
            clamp: CameraStateClamp::default(),
        }
    }
}

/// Result of checking a tracked entity against the scene
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingStatus {
    /// Not checked yet
    Pending,
    /// Present in the scene, with the bounds it actually has
    Validated { renderer: bool, collider: bool },
    /// Gone from the scene; contributes a point at its last known position
    Lost,
}

/// An entity followed by a [`Tracker`]
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedObject {
    entity: EntityRef,
    source: BoundsSource,
    padding: f32,
    last_position: Option<Vec2>,
    sample_dt: f32,
    status: TrackingStatus,
}

impl TrackedObject {
    pub fn new(entity: EntityRef, source: BoundsSource) -> Self {
        Self {
            entity,
            source,
            padding: 0.0,
            last_position: None,
            sample_dt: 0.0,
            status: TrackingStatus::Pending,
        }
    }

    /// Extra padding for this entity alone
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn entity(&self) -> EntityRef {
        self.entity
    }

    pub fn source(&self) -> BoundsSource {
        self.source
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    pub fn tracks(&self, entity: EntityRef) -> bool {
        self.entity == entity
    }

    /// Check the entity against the scene once, reporting what is missing
    fn validate(&mut self, scene: &dyn SpatialQuery) {
        if self.status != TrackingStatus::Pending {
            return;
        }

        let Some(position) = scene.position(self.entity) else {
            tracing::error!(entity = self.entity.0, "tracked entity not found in the scene");
            self.status = TrackingStatus::Lost;
            return;
        };

        let renderer = scene.renderer_bounds(self.entity).is_some();
        if self.source.uses_renderer() && !renderer {
            tracing::warn!(entity = self.entity.0, "renderer bounds not found on tracked entity");
        }
        let collider = scene.collider_bounds(self.entity).is_some();
        if self.source.uses_collider() && !collider {
            tracing::warn!(entity = self.entity.0, "collider bounds not found on tracked entity");
        }

        self.last_position = Some(position);
        self.status = TrackingStatus::Validated { renderer, collider };
    }

    /// Record the position for velocity estimation, once per fixed tick
    fn sample(&mut self, scene: &dyn SpatialQuery, dt: f32) {
        self.validate(scene);
        if self.status == TrackingStatus::Lost {
            return;
        }

        match scene.position(self.entity) {
            Some(position) => {
                self.last_position = Some(position);
                self.sample_dt = dt;
            }
            None => {
                tracing::warn!(
                    entity = self.entity.0,
                    "tracked entity left the scene, keeping its last position"
                );
                self.status = TrackingStatus::Lost;
            }
        }
    }

    fn current_position(&self, scene: &dyn SpatialQuery) -> Option<Vec2> {
        match self.status {
            TrackingStatus::Lost => self.last_position,
            _ => scene.position(self.entity).or(self.last_position),
        }
    }

    /// Current bounds: the position plus whichever bounds the source selects
    pub fn bounds(&self, scene: &dyn SpatialQuery) -> Option<Bounds2> {
        let position = self.current_position(scene)?;
        let mut bounds = Bounds2::point(position);

        if self.status != TrackingStatus::Lost {
            if self.source.uses_renderer() {
                if let Some(renderer) = scene.renderer_bounds(self.entity) {
                    bounds.encapsulate(&renderer);
                }
            }
            if self.source.uses_collider() {
                if let Some(collider) = scene.collider_bounds(self.entity) {
                    bounds.encapsulate(&collider);
                }
            }
        }

        Some(bounds.expanded(self.padding))
    }

    /// Velocity since the last fixed tick, zero before the first sample
    pub fn velocity(&self, scene: &dyn SpatialQuery) -> Vec2 {
        if self.sample_dt <= 0.0 {
            return Vec2::ZERO;
        }
        match (self.current_position(scene), self.last_position) {
            (Some(current), Some(last)) => (current - last) / self.sample_dt,
            _ => Vec2::ZERO,
        }
    }

    /// Bounds moved `time` seconds ahead along the current velocity
    pub fn predicted_bounds(&self, scene: &dyn SpatialQuery, time: f32) -> Option<Bounds2> {
        let bounds = self.bounds(scene)?;
        Some(bounds.translated(self.velocity(scene) * time))
    }
}

/// Frames every tracked entity
#[derive(Clone, Debug, Default)]
pub struct Tracker {
    settings: TrackerSettings,
    tracked: Vec<TrackedObject>,
}

impl Tracker {
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            tracked: Vec::new(),
        }
    }

    /// Start with a set of tracked objects (builder pattern)
    pub fn with_tracked(mut self, objects: impl IntoIterator<Item = TrackedObject>) -> Self {
        for object in objects {
            self.add_tracked_object(object);
        }
        self
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut TrackerSettings {
        &mut self.settings
    }

    pub fn tracked(&self) -> &[TrackedObject] {
        &self.tracked
    }

    pub fn is_tracking(&self, entity: EntityRef) -> bool {
        self.tracked.iter().any(|object| object.tracks(entity))
    }

    /// Replace the tracked set
    pub fn set_tracked(
        &mut self,
        entities: impl IntoIterator<Item = EntityRef>,
        source: BoundsSource,
    ) {
        self.tracked.clear();
        for entity in entities {
            self.add_tracked(entity, source);
        }
    }

    /// Track another entity; already tracked entities are reported and ignored
    pub fn add_tracked(&mut self, entity: EntityRef, source: BoundsSource) {
        self.add_tracked_object(TrackedObject::new(entity, source));
    }

    pub fn add_tracked_object(&mut self, object: TrackedObject) {
        if self.is_tracking(object.entity) {
            tracing::warn!(entity = object.entity.0, "entity already tracked");
            return;
        }
        self.tracked.push(object);
    }

    /// Stop tracking an entity, returns false if it was not tracked
    pub fn remove_tracked(&mut self, entity: EntityRef) -> bool {
        let Some(index) = self.tracked.iter().position(|object| object.tracks(entity)) else {
            tracing::warn!(entity = entity.0, "entity not tracked");
            return false;
        };
        self.tracked.remove(index);
        true
    }

    fn bounds_for(&self, object: &TrackedObject, scene: &dyn SpatialQuery) -> Option<Bounds2> {
        match self.settings.prediction {
            Some(prediction) => {
                let predicted = object.predicted_bounds(scene, prediction.time)?;
                if prediction.enforce_current_bounds {
                    object.bounds(scene).map(|current| predicted.union(&current))
                } else {
                    Some(predicted)
                }
            }
            None => object.bounds(scene),
        }
    }
}

impl CameraController for Tracker {
    fn label(&self) -> &'static str {
        "Tracker"
    }

    fn initialize(&mut self, ctx: &TickContext<'_>) {
        let scene = ctx.scene();
        for object in &mut self.tracked {
            object.validate(scene);
        }
    }

    fn update(&mut self, ctx: &TickContext<'_>) {
        // objects added since the last tick
        let scene = ctx.scene();
        for object in &mut self.tracked {
            object.validate(scene);
        }
    }

    fn fixed_update(&mut self, ctx: &TickContext<'_>) {
        let scene = ctx.scene();
        let dt = ctx.dt();
        for object in &mut self.tracked {
            object.sample(scene, dt);
        }
    }

    fn compute_state(&self, ctx: &ComputeContext<'_>) -> CameraState {
        if self.tracked.is_empty() {
            tracing::warn!("no objects to track");
            return CameraState::empty();
        }

        let scene = ctx.scene();
        let Some(bounds) = self
            .tracked
            .iter()
            .filter_map(|object| self.bounds_for(object, scene))
            .reduce(|acc, bounds| acc.union(&bounds))
        else {
            tracing::warn!("none of the tracked entities could be located");
            return CameraState::empty();
        };

        let aspect = ctx.camera().aspect();
        let padded = bounds.expanded(self.settings.padding);
        let state = CameraState::covering_bounds(padded, aspect, Vec2::splat(0.5));
        self.settings.clamp.clamp_state(state, aspect)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
