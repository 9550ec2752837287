//! Configuration module for the pesu-downloader.
//!
//! This module handles:
//! - Runtime configuration assembled from CLI arguments and environment
//! - Output mode definitions
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, Credentials, OptionsConfig, ENV_PASSWORD, ENV_USERNAME};
pub use modes::OutputMode;
pub use validation::{parse_material_kind, validate_config};
