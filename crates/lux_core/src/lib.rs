//! Lux Core - scene data shared by the renderer and its loaders.
//!
//! This crate provides:
//!
//! - **Mesh**: vertex/normal arena with face adjacency, indexed by triangles
//! - **RenderConfig**: view plane, sampling and recursion settings
//! - **CoreError**: failures at the loader/config boundary
//!
//! # Example
//!
//! ```ignore
//! use lux_core::RenderConfig;
//!
//! let config = RenderConfig::from_json_str(r#"{ "width": 320, "max_depth": 8 }"#)?;
//! assert_eq!(config.height, 400); // defaults fill the rest
//! ```

pub mod config;
pub mod error;
pub mod mesh;

// Re-export commonly used types
pub use config::RenderConfig;
pub use error::{CoreError, Result};
pub use mesh::Mesh;
