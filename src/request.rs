//! Build request validation: runtime versions and target architectures.
//!
//! Both allow-lists are fixed tables. They deliberately do not probe the
//! installed pip for what it supports, so behavior stays stable across
//! installer upgrades.

use std::fmt;
use std::path::PathBuf;

use crate::error::BuildError;

/// Python runtime versions this builder will target.
pub const SUPPORTED_VERSIONS: &[&str] = &["3.8", "3.9", "3.10", "3.11", "3.12"];

/// Default manifest path when `-r/--requirements` is not given.
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";

/// A validated `major.minor` Python version from the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeVersion(String);

impl RuntimeVersion {
    /// Parse and validate a version string.
    ///
    /// Shape is checked first (digits, one dot, digits), then membership in
    /// [`SUPPORTED_VERSIONS`]. Both failures are validation errors.
    pub fn parse(raw: &str) -> Result<Self, BuildError> {
        let raw = raw.trim();
        if !has_major_minor_shape(raw) {
            return Err(BuildError::validation(format!(
                "invalid python version '{raw}'; expected the form MAJOR.MINOR (e.g. 3.12)"
            )));
        }
        if !SUPPORTED_VERSIONS.contains(&raw) {
            return Err(BuildError::validation(format!(
                "unsupported python version '{raw}'; supported: {}",
                SUPPORTED_VERSIONS.join(", ")
            )));
        }
        Ok(RuntimeVersion(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn has_major_minor_shape(raw: &str) -> bool {
    let Some((major, minor)) = raw.split_once('.') else {
        return false;
    };
    !major.is_empty()
        && !minor.is_empty()
        && major.bytes().all(|b| b.is_ascii_digit())
        && minor.bytes().all(|b| b.is_ascii_digit())
}

/// Target CPU architecture for the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Arm64,
    X86_64,
}

impl Arch {
    /// Map a CLI/menu token to an architecture.
    ///
    /// Accepts exactly the menu ordinals and the named tokens; matching is
    /// case-sensitive.
    pub fn parse(token: &str) -> Result<Self, BuildError> {
        match token.trim() {
            "1" | "ARM_64" => Ok(Arch::Arm64),
            "2" | "AMD_86" => Ok(Arch::X86_64),
            other => Err(BuildError::validation(format!(
                "unknown architecture '{other}'; expected 1/ARM_64 or 2/AMD_86"
            ))),
        }
    }

    /// The pip `--platform` tag for binary wheels on this architecture.
    pub fn platform_tag(self) -> &'static str {
        match self {
            Arch::Arm64 => "manylinux2014_aarch64",
            Arch::X86_64 => "manylinux2014_x86_64",
        }
    }

    /// Human-facing label, matching the interactive menu.
    pub fn label(self) -> &'static str {
        match self {
            Arch::Arm64 => "ARM_64",
            Arch::X86_64 => "AMD_86",
        }
    }
}

/// A fully validated build request.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub version: RuntimeVersion,
    pub arch: Arch,
    pub requirements: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_versions() {
        for v in SUPPORTED_VERSIONS {
            assert_eq!(RuntimeVersion::parse(v).unwrap().as_str(), *v);
        }
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["", "3", "3.", ".11", "3.11.2", "3.x", "python3.11", "3 .11"] {
            let err = RuntimeVersion::parse(bad).unwrap_err();
            assert!(
                err.to_string().contains("invalid python version"),
                "wrong error for '{bad}': {err}"
            );
        }
    }

    #[test]
    fn rejects_wellformed_unsupported_versions() {
        for bad in ["2.7", "3.7", "3.13", "4.0"] {
            let err = RuntimeVersion::parse(bad).unwrap_err();
            assert!(
                err.to_string().contains("unsupported python version"),
                "wrong error for '{bad}': {err}"
            );
        }
    }

    #[test]
    fn arch_tokens_map_to_platform_tags() {
        for token in ["1", "ARM_64"] {
            assert_eq!(Arch::parse(token).unwrap(), Arch::Arm64);
        }
        for token in ["2", "AMD_86"] {
            assert_eq!(Arch::parse(token).unwrap(), Arch::X86_64);
        }
        assert_eq!(Arch::Arm64.platform_tag(), "manylinux2014_aarch64");
        assert_eq!(Arch::X86_64.platform_tag(), "manylinux2014_x86_64");
    }

    #[test]
    fn arch_rejects_unknown_tokens() {
        for bad in ["", "3", "ARM", "x86_64", "aarch64"] {
            assert!(Arch::parse(bad).is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn arch_token_matching_is_case_sensitive() {
        for bad in ["arm_64", "amd_86", "Arm_64", "Amd_86"] {
            assert!(Arch::parse(bad).is_err(), "accepted '{bad}'");
        }
    }
}
