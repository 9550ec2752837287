//! Configuration structures.
//!
//! There is no config file: credentials come from the environment (or a
//! `.env` file picked up at startup) and everything else from CLI
//! arguments. See [`crate::cli::Args::into_config`].

use std::path::PathBuf;

use crate::config::modes::OutputMode;
use crate::portal::MaterialKind;

/// Environment variable holding the portal username.
pub const ENV_USERNAME: &str = "PESU_USERNAME";

/// Environment variable holding the portal password.
pub const ENV_PASSWORD: &str = "PESU_PASSWORD";

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub options: OptionsConfig,
}

/// Portal login credentials.
///
/// Sourced from `PESU_USERNAME` / `PESU_PASSWORD`, never from argv, so
/// the password does not show up in shell history or process listings.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Download options.
#[derive(Debug, Clone)]
pub struct OptionsConfig {
    /// Course title (or course code) to look up in the portal.
    pub course: String,

    /// Semester to search in (1-8).
    pub semester: u8,

    /// Output layout mode.
    pub mode: OutputMode,

    /// Output directory. When unset, a directory named after the course
    /// is created in the working directory.
    pub output: Option<PathBuf>,

    /// Which category of material to download.
    pub material_kind: MaterialKind,

    /// Whether to show per-file download progress.
    pub show_downloads: bool,
}
