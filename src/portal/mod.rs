//! PESU Academy portal access: session handling, page scraping, and
//! typed content fetchers.

pub mod auth;
pub mod client;
pub mod scrape;
pub mod types;

pub use client::PortalClient;
pub use types::{Course, CourseContent, Material, MaterialKind, Topic, Unit};
