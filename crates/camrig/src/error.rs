//! Rig and configuration error types

use std::io;
use thiserror::Error;

use crate::rig::ControllerId;

/// Errors returned by [`ControllerRig`](crate::ControllerRig) accessors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RigError {
    /// The id does not refer to a controller in this rig
    #[error("unknown controller {0:?}")]
    UnknownController(ControllerId),

    /// The controller exists but is not of the requested type
    #[error("controller {id:?} is a {actual} controller, not {expected}")]
    TypeMismatch {
        id: ControllerId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result type for rig operations
pub type Result<T> = std::result::Result<T, RigError>;

/// Errors that can occur when loading a rig configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two controllers share a name
    #[error("duplicate controller name `{0}`")]
    DuplicateName(String),

    /// A controller refers to a name that is not defined
    #[error("controller `{controller}` references unknown controller `{reference}`")]
    UnknownReference { controller: String, reference: String },

    /// Following child references leads back to the same controller
    #[error("recursive reference through controller `{0}`")]
    RecursiveReference(String),

    /// Applying a controller's flags to the built rig failed
    #[error("rig error: {0}")]
    Rig(#[from] RigError),

    /// A composite controller has too few children
    #[error("controller `{controller}` needs at least {expected} child controller(s), got {actual}")]
    WrongChildCount {
        controller: String,
        expected: usize,
        actual: usize,
    },
}
