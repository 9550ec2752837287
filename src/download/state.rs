//! Download run state tracking.

use std::path::PathBuf;

/// Counters and context for one download run.
#[derive(Debug, Default)]
pub struct DownloadState {
    // Course info
    pub course_title: String,

    // Where output is being written
    pub output_root: Option<PathBuf>,

    // Per-file statistics
    pub matched: u64,
    pub saved: u64,
    pub failed: u64,
    pub skipped: u64,
    pub bytes_downloaded: u64,

    // Per-unit statistics (merged-PDF mode)
    pub units_merged: u64,
    pub units_skipped: u64,
}

impl DownloadState {
    /// Create a new state for a course download run.
    pub fn new(course_title: String) -> Self {
        Self {
            course_title,
            ..Default::default()
        }
    }

    /// Count a material yielded by traversal.
    pub fn record_matched(&mut self) {
        self.matched += 1;
    }

    /// Count a file written to its final path.
    pub fn record_saved(&mut self, bytes: u64) {
        self.saved += 1;
        self.bytes_downloaded += bytes;
    }

    /// Count a download that errored and was skipped.
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Count a material deliberately left out (e.g. non-PDF in merge mode).
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Count a unit whose merged PDF was written.
    pub fn record_unit_merged(&mut self) {
        self.units_merged += 1;
    }

    /// Count a unit that had candidates but produced no merged output.
    pub fn record_unit_skipped(&mut self) {
        self.units_skipped += 1;
    }
}
