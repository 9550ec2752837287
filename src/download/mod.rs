//! Download module for course material downloading.
//!
//! This module provides:
//! - Download state tracking
//! - Single material fetching
//! - Folder-tree download mode
//! - Merged per-unit PDF download mode

pub mod fetch;
pub mod folder;
pub mod single_pdf;
pub mod state;

pub use fetch::{fetch_material, FetchedFile};
pub use folder::download_folder_tree;
pub use single_pdf::download_unit_pdfs;
pub use state::DownloadState;
