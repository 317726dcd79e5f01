//! Core error types

use thiserror::Error;

/// Errors raised by the camera math core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A channel array had the wrong number of entries
    #[error("expected {expected} channels, got {actual}")]
    ChannelCount { expected: usize, actual: usize },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
