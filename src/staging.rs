//! Staging tree layout and lifecycle.
//!
//! The layer layout Lambda expects is fixed:
//!
//! ```text
//! layers/
//!   python/lib/python<version>/site-packages/   <- pip --target
//!   aws_lambda_layer.zip                        <- archiver output
//! ```
//!
//! The tree is removed unconditionally before every build so re-runs never
//! mix packages from different versions or architectures.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::request::RuntimeVersion;

/// Staging root, relative to the invocation directory.
pub const LAYERS_DIR: &str = "layers";

/// Directory zipped into the archive (the layout Lambda mounts).
pub const LAYER_CONTENT_DIR: &str = "python";

/// Staging root for a build rooted at `root`.
pub fn staging_root(root: &Path) -> PathBuf {
    root.join(LAYERS_DIR)
}

/// The pip `--target` directory for a runtime version.
pub fn site_packages_dir(root: &Path, version: &RuntimeVersion) -> PathBuf {
    staging_root(root)
        .join(LAYER_CONTENT_DIR)
        .join("lib")
        .join(format!("python{version}"))
        .join("site-packages")
}

/// Remove any previous staging tree and create a fresh one.
///
/// Returns the site-packages directory the installer should target.
pub fn prepare_staging(root: &Path, version: &RuntimeVersion) -> Result<PathBuf, BuildError> {
    let staging = staging_root(root);
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|source| BuildError::Environment {
            path: staging.clone(),
            source,
        })?;
    }
    let target = site_packages_dir(root, version);
    fs::create_dir_all(&target).map_err(|source| BuildError::Environment {
        path: target.clone(),
        source,
    })?;
    Ok(target)
}

/// Check that the install actually produced something.
///
/// pip can exit zero while installing nothing (e.g. an empty manifest);
/// an empty layer is never what the caller wants.
pub fn verify_install(target: &Path) -> Result<(), BuildError> {
    let mut entries = match fs::read_dir(target) {
        Ok(entries) => entries,
        Err(_) => return Err(BuildError::EmptyInstall(target.to_path_buf())),
    };
    if entries.next().is_none() {
        return Err(BuildError::EmptyInstall(target.to_path_buf()));
    }
    Ok(())
}

/// Check that the manifest exists and is readable before touching anything.
pub fn check_manifest(path: &Path) -> Result<(), BuildError> {
    match fs::File::open(path) {
        Ok(_) => Ok(()),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(BuildError::InputNotFound(path.to_path_buf()))
        }
        Err(source) => Err(BuildError::Permission {
            path: path.to_path_buf(),
            source,
        }),
    }
}
