//! Argument validation for privileged commands
//!
//! Commands are run with argument vectors, never through a shell, so the only
//! thing left to guard is a value being read as an option by the tool.

use std::path::{Path, PathBuf};

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a device path or mount point taken from command output
///
/// # Examples
/// ```
/// # use nilfs_gui_common::validation::validate_argument;
/// assert!(validate_argument("device", "/dev/sda5").is_ok());
/// assert!(validate_argument("device", "-o remount").is_err());
/// assert!(validate_argument("device", "").is_err());
/// ```
pub fn validate_argument(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }

    if value.starts_with('-') {
        return Err(ValidationError::new(field, "cannot start with '-'"));
    }

    if value.contains('\0') {
        return Err(ValidationError::new(field, "cannot contain null bytes"));
    }

    Ok(())
}

/// Validate the directory returned by the directory chooser
///
/// Returns `None` for a cancelled or whitespace-only choice. Relative paths
/// are rejected since `mount` would resolve them against our working directory.
pub fn validate_directory(choice: &str) -> Option<Result<PathBuf, ValidationError>> {
    let choice = choice.trim_end_matches(['\n', '\r']);
    if choice.trim().is_empty() {
        return None;
    }

    if !Path::new(choice).is_absolute() {
        return Some(Err(ValidationError::new(
            "mount point",
            format!("'{choice}' is not an absolute path"),
        )));
    }

    Some(validate_argument("mount point", choice).map(|()| PathBuf::from(choice)))
}
