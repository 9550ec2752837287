//! Configuration validation logic.

use crate::config::loader::{Config, ENV_PASSWORD, ENV_USERNAME};
use crate::error::{Error, Result};
use crate::portal::MaterialKind;

/// Lowest valid semester number.
const MIN_SEMESTER: u8 = 1;

/// Highest valid semester number.
const MAX_SEMESTER: u8 = 8;

/// Validate the entire configuration. Runs before any network activity
/// so credential problems surface immediately.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_credential(ENV_USERNAME, &config.credentials.username)?;
    validate_credential(ENV_PASSWORD, &config.credentials.password)?;
    validate_course(&config.options.course)?;
    validate_semester(config.options.semester)?;

    Ok(())
}

/// Validate a single credential value.
pub fn validate_credential(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingConfig(format!(
            "{} (set it in the environment or a .env file)",
            name
        )));
    }

    Ok(())
}

/// Validate the course lookup string.
pub fn validate_course(course: &str) -> Result<()> {
    if course.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "course".to_string(),
            message: "course title cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate the semester number.
pub fn validate_semester(semester: u8) -> Result<()> {
    if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&semester) {
        return Err(Error::ConfigValidation {
            field: "semester".to_string(),
            message: format!(
                "must be between {} and {} (got {})",
                MIN_SEMESTER, MAX_SEMESTER, semester
            ),
        });
    }

    Ok(())
}

/// Map a portal material type code to a kind.
pub fn parse_material_kind(code: u8) -> Result<MaterialKind> {
    MaterialKind::from_code(code).ok_or_else(|| Error::ConfigValidation {
        field: "filetype".to_string(),
        message: format!(
            "unknown material type code {} (2 = slides, 3 = notes, 4 = assignments, 5 = question bank)",
            code
        ),
    })
}
