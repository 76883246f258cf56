//! Startup checks for required tools and mounted volumes

use crate::nilfs::NilfsTools;

/// Why the application cannot run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightError {
    /// A NILFS tool is not on `PATH`
    MissingNilfsTool(String),
    /// The privilege elevation wrapper is not on `PATH`
    MissingElevation(String),
    /// No device is mounted with the target filesystem type
    NoMounts { fs_type: String, detail: Option<String> },
}

impl PreflightError {
    /// Dialog title
    pub fn title(&self) -> &'static str {
        match self {
            PreflightError::MissingNilfsTool(_) | PreflightError::MissingElevation(_) => {
                "Missing Component"
            }
            PreflightError::NoMounts { .. } => "No NILFS Mounts",
        }
    }
}

impl std::fmt::Display for PreflightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreflightError::MissingNilfsTool(tool) => write!(
                f,
                "Cannot process NILFS checkpoints. '{tool}' not found.\n\
                 NILFS utilities have not been properly installed on this system."
            ),
            PreflightError::MissingElevation(tool) => write!(
                f,
                "Cannot process privileged actions.\n\
                 '{tool}' has not been installed on this system."
            ),
            PreflightError::NoMounts { fs_type, detail } => {
                write!(f, "Cannot find any devices mounted that use {fs_type}.")?;
                if let Some(detail) = detail {
                    write!(f, "\n\n{detail}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PreflightError {}

/// Whether `tool` resolves to an executable on `PATH`
pub fn tool_on_path(tool: &str) -> bool {
    which::which(tool).is_ok()
}

/// Run the startup checks, stopping at the first failure
///
/// Returns the mounted devices on success.
pub fn run_preflight<F>(tools: &NilfsTools, resolve: F) -> Result<Vec<String>, PreflightError>
where
    F: Fn(&str) -> bool,
{
    let config = tools.config();

    for tool in [&config.lscp_cmd, &config.chcp_cmd] {
        if !resolve(tool.as_str()) {
            return Err(PreflightError::MissingNilfsTool(tool.clone()));
        }
    }

    if !resolve(config.elevate_cmd.as_str()) {
        return Err(PreflightError::MissingElevation(config.elevate_cmd.clone()));
    }

    match tools.devices() {
        Ok(devices) if !devices.is_empty() => Ok(devices),
        Ok(_) => Err(PreflightError::NoMounts {
            fs_type: config.fs_type.clone(),
            detail: None,
        }),
        Err(e) => Err(PreflightError::NoMounts {
            fs_type: config.fs_type.clone(),
            detail: Some(format!("{e:#}")),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::fake::FakeRunner;
    use nilfs_gui_common::NilfsConfig;
    use std::rc::Rc;

    fn tools(runner: &Rc<FakeRunner>, elevate: bool) -> NilfsTools {
        NilfsTools::with_elevation(NilfsConfig::default(), runner.clone(), elevate)
    }

    #[test]
    fn test_missing_chcp() {
        let runner = Rc::new(FakeRunner::new());
        let err = run_preflight(&tools(&runner, true), |tool| tool != "chcp").unwrap_err();

        assert_eq!(err, PreflightError::MissingNilfsTool("chcp".to_string()));
        assert_eq!(err.title(), "Missing Component");
        assert!(err.to_string().contains("'chcp' not found"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_missing_elevation() {
        let runner = Rc::new(FakeRunner::new());
        let err = run_preflight(&tools(&runner, true), |tool| tool != "pkexec").unwrap_err();
        assert_eq!(err, PreflightError::MissingElevation("pkexec".to_string()));
    }

    #[test]
    fn test_root_still_needs_elevation() {
        let runner = Rc::new(FakeRunner::new());
        runner.respond("mount -l -t nilfs2", "/dev/sda5 on / type nilfs2 (rw)\n");

        let err = run_preflight(&tools(&runner, false), |tool| tool != "pkexec").unwrap_err();
        assert_eq!(err, PreflightError::MissingElevation("pkexec".to_string()));
        assert!(runner.calls().is_empty());

        let devices = run_preflight(&tools(&runner, false), |_| true).unwrap();
        assert_eq!(devices, vec!["/dev/sda5"]);
    }

    #[test]
    fn test_no_mounts() {
        let runner = Rc::new(FakeRunner::new());
        runner.respond("mount -l -t nilfs2", "");

        let err = run_preflight(&tools(&runner, true), |_| true).unwrap_err();
        assert_eq!(err.title(), "No NILFS Mounts");
        assert!(matches!(err, PreflightError::NoMounts { detail: None, .. }));
    }

    #[test]
    fn test_listing_failure_explained() {
        let runner = Rc::new(FakeRunner::new());
        let err = run_preflight(&tools(&runner, true), |_| true).unwrap_err();
        assert!(err.to_string().contains("Failed to execute mount"));
    }
}
