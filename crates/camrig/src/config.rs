//! TOML rig configuration
//!
//! A rig file lists controllers as `[[controller]]` tables. Each has a unique
//! `name`, a `kind`, and kind-specific fields; composite controllers refer to
//! their children by name.
//!
//! ```toml
//! [[controller]]
//! name = "camera"
//! kind = "shaker"
//! child = "modes"
//! active = true
//!
//! [[controller]]
//! name = "modes"
//! kind = "switcher"
//! children = ["pan", "follow"]
//!
//! [[controller]]
//! name = "pan"
//! kind = "pan"
//! [controller.settings]
//! zoom_factor = 0.25
//!
//! [[controller]]
//! name = "follow"
//! kind = "tracker"
//! [[controller.targets]]
//! entity = 7
//! bounds = "renderer"
//! ```

use std::fs;
use std::path::Path;

use camrig_core::{CameraState, Space};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::controller::CameraController;
use crate::controllers::{
    FixedState, PanController, PanSettings, Shaker, Smoother, SmootherSettings, Switcher,
    TrackedObject, Tracker, TrackerSettings,
};
use crate::error::ConfigError;
use crate::rig::{ControllerId, ControllerRig};
use crate::scene::{BoundsSource, EntityRef};

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

// =============================================================================
// File format
// =============================================================================

/// A whole rig file
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct RigConfig {
    #[serde(default, rename = "controller")]
    pub controllers: Vec<ControllerConfig>,
}

/// One `[[controller]]` table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ControllerConfig {
    pub name: String,
    /// Drive the camera from this controller
    #[serde(default)]
    pub active: bool,
    #[serde(default = "default_user_input")]
    pub user_input: bool,
    /// Space the state is applied in when active
    #[serde(default)]
    pub space: Space,
    #[serde(flatten)]
    pub kind: ControllerKind,
}

fn default_user_input() -> bool {
    true
}

/// Kind-specific part of a controller table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerKind {
    Switcher {
        children: Vec<String>,
        #[serde(default)]
        index: usize,
    },
    Pan {
        #[serde(default)]
        settings: PanSettings,
    },
    Smoother {
        child: String,
        #[serde(default)]
        settings: SmootherSettings,
    },
    Tracker {
        #[serde(default)]
        settings: TrackerSettings,
        #[serde(default)]
        targets: Vec<TrackedTarget>,
    },
    Shaker {
        child: String,
    },
    Fixed {
        #[serde(default)]
        state: CameraState,
    },
}

impl ControllerKind {
    /// Names of the controllers this one reads from
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Switcher { children, .. } => children.iter().map(String::as_str).collect(),
            Self::Smoother { child, .. } | Self::Shaker { child } => vec![child.as_str()],
            Self::Pan { .. } | Self::Tracker { .. } | Self::Fixed { .. } => Vec::new(),
        }
    }
}

/// An entity a configured tracker starts out following
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackedTarget {
    pub entity: EntityRef,
    #[serde(default)]
    pub bounds: BoundsSource,
    #[serde(default)]
    pub padding: f32,
}

impl From<&TrackedTarget> for TrackedObject {
    fn from(target: &TrackedTarget) -> Self {
        TrackedObject::new(target.entity, target.bounds).with_padding(target.padding)
    }
}

// =============================================================================
// Loading
// =============================================================================

/// A rig built from a config, with its controllers addressable by name
pub struct LoadedRig {
    pub rig: ControllerRig,
    pub names: FxHashMap<String, ControllerId>,
}

impl LoadedRig {
    /// Id of the controller called `name`
    pub fn id(&self, name: &str) -> Option<ControllerId> {
        self.names.get(name).copied()
    }
}

#[derive(Clone, Copy)]
enum Visit {
    Pending,
    InProgress,
    Done(ControllerId),
}

impl RigConfig {
    /// Parse a rig from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a rig file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check the controller graph and build a rig from it
    ///
    /// Children are inserted before their parents, so every id a composite
    /// controller is built with already exists.
    pub fn build(&self) -> Result<LoadedRig> {
        let mut index_of: FxHashMap<&str, usize> = FxHashMap::default();
        for (index, controller) in self.controllers.iter().enumerate() {
            if index_of.insert(controller.name.as_str(), index).is_some() {
                return Err(ConfigError::DuplicateName(controller.name.clone()));
            }
        }

        for controller in &self.controllers {
            if let ControllerKind::Switcher { children, .. } = &controller.kind {
                if children.is_empty() {
                    return Err(ConfigError::WrongChildCount {
                        controller: controller.name.clone(),
                        expected: 1,
                        actual: 0,
                    });
                }
            }
            for reference in controller.kind.references() {
                if !index_of.contains_key(reference) {
                    return Err(ConfigError::UnknownReference {
                        controller: controller.name.clone(),
                        reference: reference.to_string(),
                    });
                }
            }
        }

        let mut rig = ControllerRig::new();
        let mut visits = vec![Visit::Pending; self.controllers.len()];
        for index in 0..self.controllers.len() {
            self.insert(index, &index_of, &mut visits, &mut rig)?;
        }

        let mut names = FxHashMap::default();
        for (controller, visit) in self.controllers.iter().zip(&visits) {
            let Visit::Done(id) = *visit else {
                continue;
            };
            rig.configure(id, controller.active, controller.user_input, controller.space)?;
            names.insert(controller.name.clone(), id);
        }

        tracing::debug!(controllers = names.len(), "built camera rig from config");
        Ok(LoadedRig { rig, names })
    }

    fn insert(
        &self,
        index: usize,
        index_of: &FxHashMap<&str, usize>,
        visits: &mut [Visit],
        rig: &mut ControllerRig,
    ) -> Result<ControllerId> {
        let config = &self.controllers[index];
        match visits[index] {
            Visit::Done(id) => return Ok(id),
            Visit::InProgress => return Err(ConfigError::RecursiveReference(config.name.clone())),
            Visit::Pending => {}
        }
        visits[index] = Visit::InProgress;

        let mut children = Vec::new();
        for reference in config.kind.references() {
            let child = index_of.get(reference).copied().ok_or_else(|| {
                ConfigError::UnknownReference {
                    controller: config.name.clone(),
                    reference: reference.to_string(),
                }
            })?;
            children.push(self.insert(child, index_of, visits, rig)?);
        }

        let controller = instantiate(&config.kind, &children);
        let id = rig.insert_boxed(controller);
        visits[index] = Visit::Done(id);
        Ok(id)
    }
}

/// Create the controller for `kind`, with children already resolved in order
fn instantiate(kind: &ControllerKind, children: &[ControllerId]) -> Box<dyn CameraController> {
    match kind {
        ControllerKind::Switcher { index, .. } => {
            let mut switcher = Switcher::new(children.iter().copied());
            switcher.switch_to(*index);
            Box::new(switcher)
        }
        ControllerKind::Pan { settings } => Box::new(PanController::new(settings.clone())),
        ControllerKind::Smoother { settings, .. } => match children.first() {
            Some(&child) => Box::new(Smoother::new(child, settings.clone())),
            None => Box::new(Smoother::detached(settings.clone())),
        },
        ControllerKind::Tracker { settings, targets } => Box::new(
            Tracker::new(settings.clone()).with_tracked(targets.iter().map(TrackedObject::from)),
        ),
        ControllerKind::Shaker { .. } => match children.first() {
            Some(&child) => Box::new(Shaker::new(child)),
            None => Box::new(Shaker::detached()),
        },
        ControllerKind::Fixed { state } => Box::new(FixedState::new(*state)),
    }
}
