//! PESU Downloader - course material downloader for PESU Academy
//!
//! This library provides functionality for downloading course materials from
//! the PESU Academy student portal.
//!
//! # Features
//!
//! - Portal login with CSRF token handling
//! - Course lookup by title or course code within a semester
//! - Unit, topic, and material tree traversal
//! - Folder-tree downloads mirroring the course structure
//! - Merged per-unit PDFs
//!
//! # Example
//!
//! ```no_run
//! use pesu_downloader::{Credentials, MaterialKind, PortalClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PortalClient::new()?;
//!     let credentials = Credentials {
//!         username: std::env::var("PESU_USERNAME")?,
//!         password: std::env::var("PESU_PASSWORD")?,
//!     };
//!     client.login(&credentials).await?;
//!
//!     let course = client.find_course("Data Structures", 3).await?;
//!     let content = client
//!         .fetch_course_content(&course, MaterialKind::Slides)
//!         .await?;
//!     println!("{} units", content.units.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod material;
pub mod output;
pub mod pdf;
pub mod portal;

// Re-exports for convenience
pub use config::{Config, Credentials, OutputMode};
pub use download::{download_folder_tree, download_unit_pdfs, DownloadState};
pub use error::{Error, Result};
pub use portal::{Course, CourseContent, Material, MaterialKind, PortalClient};
