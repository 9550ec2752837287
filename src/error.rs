//! Error types for the pesu-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Portal errors
    #[error("Portal error: {0}")]
    Portal(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Course '{course}' not found in semester {semester}")]
    CourseNotFound { course: String, semester: u8 },

    #[error("No materials found: {0}")]
    NoMaterials(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // PDF errors
    #[error("PDF merge failed: {0}")]
    Merge(String),

    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the failure means "nothing matched" rather than "something broke".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::CourseNotFound { .. } | Error::NoMaterials(_)
        )
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const NO_MATERIALS: i32 = 2;
}
