//! Output mode definitions.

use std::fmt;

/// How downloaded materials are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One directory per unit and topic, preserving file types (default).
    #[default]
    Folder,
    /// One merged PDF per unit.
    SinglePdf,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Folder => write!(f, "folder"),
            OutputMode::SinglePdf => write!(f, "singlepdf"),
        }
    }
}
