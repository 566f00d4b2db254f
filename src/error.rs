//! Typed failures for the layer build pipeline.
//!
//! Every variant is terminal for the run: the binary prints the message and
//! exits non-zero. Orchestration code carries these inside `anyhow::Error`,
//! so callers (and tests) can still `downcast_ref::<BuildError>()` to tell
//! the failure classes apart.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Bad CLI input: malformed or unsupported version, unknown
    /// architecture token, unknown flag.
    #[error("{0}")]
    Validation(String),

    /// The requirements manifest does not exist.
    #[error("requirements file not found: '{0}'")]
    InputNotFound(PathBuf),

    /// The requirements manifest exists but cannot be read.
    #[error("requirements file '{path}' is not readable: {source}")]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required external tool is missing from PATH.
    #[error("required tool '{tool}' not found on PATH (install: {package})")]
    MissingDependency { tool: String, package: String },

    /// The staging tree could not be removed or created.
    #[error("failed to prepare staging directory '{path}': {source}")]
    Environment {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The installer exited non-zero.
    #[error("dependency install failed ({status}): {detail}")]
    Install { status: String, detail: String },

    /// The installer succeeded but nothing landed in the target directory.
    #[error("no packages were installed into '{0}'")]
    EmptyInstall(PathBuf),

    /// The archiver exited non-zero.
    #[error("archive creation failed ({status}): {detail}")]
    Archive { status: String, detail: String },

    /// The archive file is missing or empty after the archiver reported
    /// success.
    #[error("archive '{0}' is missing or empty after build")]
    ArchiveVerification(PathBuf),
}

impl BuildError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BuildError::Validation(msg.into())
    }
}
