//! pip invocation for cross-platform binary-only installs.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use crate::error::BuildError;
use crate::request::{Arch, RuntimeVersion};

/// Arguments for a binary-only cross-platform install into `target`.
///
/// `--only-binary=:all:` forbids source builds; the wheels must already be
/// published for the target platform tag, which is the whole point of a
/// layer built on a foreign host.
pub fn install_args(
    manifest: &Path,
    arch: Arch,
    version: &RuntimeVersion,
    target: &Path,
) -> Vec<String> {
    vec![
        "install".to_string(),
        "--platform".to_string(),
        arch.platform_tag().to_string(),
        "--target".to_string(),
        target.display().to_string(),
        "--implementation".to_string(),
        "cp".to_string(),
        "--python-version".to_string(),
        version.as_str().to_string(),
        "--only-binary=:all:".to_string(),
        "-r".to_string(),
        manifest.display().to_string(),
    ]
}

/// Run the installer. Non-zero exit surfaces stderr in the error.
pub fn install_dependencies(
    installer: &Path,
    manifest: &Path,
    arch: Arch,
    version: &RuntimeVersion,
    target: &Path,
) -> Result<()> {
    let args = install_args(manifest, arch, version, target);
    let output = Command::new(installer)
        .args(&args)
        .output()
        .with_context(|| format!("running installer '{}'", installer.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BuildError::Install {
            status: output.status.to_string(),
            detail: stderr.trim().to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn args_carry_platform_target_and_binary_constraint() {
        let version = RuntimeVersion::parse("3.11").unwrap();
        let target = PathBuf::from("layers/python/lib/python3.11/site-packages");
        let args = install_args(Path::new("requirements.txt"), Arch::Arm64, &version, &target);

        assert_eq!(args[0], "install");
        let joined = args.join(" ");
        assert!(joined.contains("--platform manylinux2014_aarch64"));
        assert!(joined.contains("--target layers/python/lib/python3.11/site-packages"));
        assert!(joined.contains("--implementation cp"));
        assert!(joined.contains("--python-version 3.11"));
        assert!(joined.contains("--only-binary=:all:"));
        assert!(joined.contains("-r requirements.txt"));
    }

    #[test]
    fn x86_requests_the_x86_manylinux_tag() {
        let version = RuntimeVersion::parse("3.12").unwrap();
        let args = install_args(
            Path::new("reqs.txt"),
            Arch::X86_64,
            &version,
            Path::new("target"),
        );
        assert!(args.join(" ").contains("--platform manylinux2014_x86_64"));
    }

    #[test]
    fn failed_install_reports_stderr() {
        // `false` exits 1 with no output; any absolute path works as the
        // "installer" here since we only exercise the status handling.
        let version = RuntimeVersion::parse("3.11").unwrap();
        let installer = which::which("false").expect("false should exist");
        let err = install_dependencies(
            &installer,
            Path::new("requirements.txt"),
            Arch::Arm64,
            &version,
            Path::new("target"),
        )
        .unwrap_err();
        let build_err = err.downcast_ref::<BuildError>().expect("typed error");
        assert!(matches!(build_err, BuildError::Install { .. }));
    }
}
