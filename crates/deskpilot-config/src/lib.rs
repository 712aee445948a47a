//! Configuration models and file loading.
//!
//! This crate owns the Deskpilot config schema and the JSON5 file loader
//! used by the host shell when wiring the agent core.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading APIs.
pub use error::ConfigError;
/// File loader entry points.
pub use loader::{default_config_path, load, load_from_path};
/// Configuration schema models.
pub use model::*;
