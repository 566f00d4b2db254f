//! The build pipeline: validate, stage, install, verify, archive, report.
//!
//! Strictly sequential and fail-fast. Nothing is retried and a failed run
//! leaves the staging tree as-is for inspection.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::archive::{create_archive, verify_archive};
use crate::installer::install_dependencies;
use crate::preflight::resolve_tools;
use crate::report::{write_report, BuildReport};
use crate::request::BuildRequest;
use crate::staging::{check_manifest, prepare_staging, staging_root, verify_install};

/// Outcome of a successful build.
#[derive(Debug)]
pub struct BuildOutcome {
    /// Absolute path of the produced archive.
    pub archive: PathBuf,
    pub report: BuildReport,
}

/// Run the whole pipeline for a validated request, staging under
/// `root/layers`.
pub fn run_build(root: &Path, request: &BuildRequest) -> Result<BuildOutcome> {
    // Tool resolution comes first so a missing pip or zip is reported
    // before any filesystem mutation.
    let tools = resolve_tools()?;
    check_manifest(&request.requirements)?;

    println!(
        "Building python {} layer for {} ({})",
        request.version,
        request.arch.label(),
        request.arch.platform_tag()
    );

    let target = prepare_staging(root, &request.version)?;
    println!("  Staging: {}", target.display());

    println!(
        "  Installing from '{}'...",
        request.requirements.display()
    );
    install_dependencies(
        &tools.installer,
        &request.requirements,
        request.arch,
        &request.version,
        &target,
    )?;
    verify_install(&target)?;

    let staging = staging_root(root);
    println!("  Archiving {}...", staging.display());
    let archive = create_archive(&tools.archiver, &staging)?;
    verify_archive(&archive)?;

    let report = write_report(&staging, request, &target, &archive)?;
    println!(
        "  Packaged {} files ({} bytes, sha256 {})",
        report.staged_files, report.archive_size_bytes, report.archive_sha256
    );

    let archive = fs::canonicalize(&archive)
        .with_context(|| format!("resolving archive path '{}'", archive.display()))?;
    Ok(BuildOutcome { archive, report })
}
