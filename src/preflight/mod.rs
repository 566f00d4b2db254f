//! Preflight checks for the external tools the build shells out to.
//!
//! Both the installer and the archiver must resolve on PATH before any
//! filesystem work starts. This prevents a half-built staging tree when a
//! tool turns out to be missing three steps in.

use std::path::PathBuf;

use crate::error::BuildError;

/// Candidate installer commands, tried in order.
pub const INSTALLER_CANDIDATES: &[&str] = &["pip3", "pip"];

/// Archiver command.
pub const ARCHIVER: &str = "zip";

/// Resolved absolute paths of the external tools for one run.
#[derive(Debug, Clone)]
pub struct Tools {
    pub installer: PathBuf,
    pub archiver: PathBuf,
}

/// Resolve the installer, preferring `pip3` over `pip`.
pub fn resolve_installer() -> Result<PathBuf, BuildError> {
    for candidate in INSTALLER_CANDIDATES {
        if let Ok(path) = which::which(candidate) {
            return Ok(path);
        }
    }
    Err(BuildError::MissingDependency {
        tool: INSTALLER_CANDIDATES.join("/"),
        package: "python3-pip".to_string(),
    })
}

/// Resolve the archiver.
pub fn resolve_archiver() -> Result<PathBuf, BuildError> {
    which::which(ARCHIVER).map_err(|_| BuildError::MissingDependency {
        tool: ARCHIVER.to_string(),
        package: "zip".to_string(),
    })
}

/// Resolve every tool the build needs.
pub fn resolve_tools() -> Result<Tools, BuildError> {
    Ok(Tools {
        installer: resolve_installer()?,
        archiver: resolve_archiver()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_tools_are_absolute_paths() {
        if let Ok(path) = resolve_installer() {
            assert!(path.is_absolute());
        }
        if let Ok(path) = resolve_archiver() {
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn missing_tool_error_names_tool_and_package() {
        let err = which::which("no_such_archiver_xyz")
            .map_err(|_| BuildError::MissingDependency {
                tool: "no_such_archiver_xyz".to_string(),
                package: "zip".to_string(),
            })
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no_such_archiver_xyz"));
        assert!(msg.contains("install: zip"));
    }
}
