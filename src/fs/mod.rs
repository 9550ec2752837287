//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename generation and extension resolution

pub mod naming;
pub mod paths;

pub use naming::{sanitize_component, unique_path};
pub use paths::{output_root, topic_dir, unit_pdf_path};
