//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{
    parse_material_kind, Config, Credentials, OptionsConfig, OutputMode, ENV_PASSWORD,
    ENV_USERNAME,
};
use crate::error::Result;

/// PESU Academy course material downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "pesu-downloader",
    version,
    about = "Download course materials from PESU Academy",
    long_about = "A CLI tool to download slides, notes, assignments, and question banks from the PESU Academy portal.\n\n\
                  Materials are organized into one directory per unit and topic, or merged into one PDF per unit.\n\
                  Login credentials are read from the PESU_USERNAME and PESU_PASSWORD environment variables\n\
                  (a .env file in the working directory is also picked up)."
)]
pub struct Args {
    /// Course title or course code, exactly as the portal lists it.
    #[arg(short, long)]
    pub course: String,

    /// Semester the course belongs to (1-8).
    #[arg(short, long)]
    pub semester: u8,

    /// Output layout.
    #[arg(short, long, value_enum, default_value = "folder")]
    pub mode: OutputModeArg,

    /// Directory to download into. Defaults to a directory named after the course.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Material type to download: 2 = slides, 3 = notes, 4 = assignments, 5 = question bank.
    #[arg(short, long, default_value_t = 2)]
    pub filetype: u8,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI output mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputModeArg {
    /// One directory per unit and topic, preserving file types.
    Folder,
    /// One merged PDF per unit.
    #[value(name = "singlepdf")]
    SinglePdf,
}

impl From<OutputModeArg> for OutputMode {
    fn from(arg: OutputModeArg) -> Self {
        match arg {
            OutputModeArg::Folder => OutputMode::Folder,
            OutputModeArg::SinglePdf => OutputMode::SinglePdf,
        }
    }
}

impl Args {
    /// Assemble the runtime configuration from the parsed arguments and
    /// the credential environment variables.
    ///
    /// Credentials are deliberately not CLI flags so the password never
    /// lands in argv or shell history. Missing variables become empty
    /// strings here and are rejected by
    /// [`crate::config::validate_config`] before any network activity.
    pub fn into_config(self) -> Result<Config> {
        let credentials = Credentials {
            username: std::env::var(ENV_USERNAME).unwrap_or_default(),
            password: std::env::var(ENV_PASSWORD).unwrap_or_default(),
        };

        Ok(Config {
            credentials,
            options: OptionsConfig {
                course: self.course,
                semester: self.semester,
                mode: self.mode.into(),
                output: self.output,
                material_kind: parse_material_kind(self.filetype)?,
                show_downloads: !self.quiet,
            },
        })
    }
}
