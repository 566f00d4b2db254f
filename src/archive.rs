//! Layer archive creation via the external `zip` tool.
//!
//! The archiver runs with the staging root as its working directory so the
//! zip entries start at `python/` (the layout Lambda mounts). The working
//! directory is scoped to the child process; the builder's own CWD never
//! changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

use crate::error::BuildError;
use crate::staging::LAYER_CONTENT_DIR;

/// Fixed archive file name, created inside the staging root.
pub const ARCHIVE_NAME: &str = "aws_lambda_layer.zip";

/// Run the archiver over the staged tree at maximum compression.
///
/// Returns the archive path on success.
pub fn create_archive(archiver: &Path, staging_root: &Path) -> Result<PathBuf> {
    let output = Command::new(archiver)
        .current_dir(staging_root)
        .arg("-r")
        .arg("-9")
        .arg(ARCHIVE_NAME)
        .arg(LAYER_CONTENT_DIR)
        .output()
        .with_context(|| {
            format!(
                "running archiver '{}' in '{}'",
                archiver.display(),
                staging_root.display()
            )
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(BuildError::Archive {
            status: output.status.to_string(),
            detail: format!("{} {}", stdout.trim(), stderr.trim())
                .trim()
                .to_string(),
        }
        .into());
    }
    Ok(staging_root.join(ARCHIVE_NAME))
}

/// Check that the archive exists and is non-empty.
pub fn verify_archive(path: &Path) -> Result<(), BuildError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
        _ => Err(BuildError::ArchiveVerification(path.to_path_buf())),
    }
}
