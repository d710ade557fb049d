//! Errors raised at the boundary between scene construction and rendering.
//!
//! Nothing on the intersection or shading path returns these; by the time a
//! ray is traced the scene is assumed valid.

use thiserror::Error;

/// Errors that can occur while configuring or assembling a scene.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Unknown object definition: {0}")]
    UnknownObject(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
