//! Build evidence written next to the archive.
//!
//! One JSON file per build, recording what was built and a digest of the
//! artifact so an upload can be verified later.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use walkdir::WalkDir;

use crate::request::BuildRequest;

/// Report file name, created inside the staging root.
pub const REPORT_NAME: &str = "build-report.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub python_version: String,
    pub architecture: String,
    pub platform_tag: String,
    pub staged_files: usize,
    pub archive: String,
    pub archive_size_bytes: u64,
    pub archive_sha256: String,
    pub created_at_utc: String,
}

/// SHA-256 of a file, streamed.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("opening '{}' for hashing", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("hashing '{}'", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex_encode(&hasher.finalize()))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Count the files staged under the install target.
pub fn staged_file_count(target: &Path) -> usize {
    WalkDir::new(target)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

/// Assemble and write the report for a finished build.
pub fn write_report(
    staging_root: &Path,
    request: &BuildRequest,
    target: &Path,
    archive: &Path,
) -> Result<BuildReport> {
    let meta = fs::metadata(archive)
        .with_context(|| format!("reading archive metadata '{}'", archive.display()))?;
    let created_at_utc = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("formatting build timestamp")?;

    let report = BuildReport {
        python_version: request.version.as_str().to_string(),
        architecture: request.arch.label().to_string(),
        platform_tag: request.arch.platform_tag().to_string(),
        staged_files: staged_file_count(target),
        archive: archive.display().to_string(),
        archive_size_bytes: meta.len(),
        archive_sha256: sha256_file(archive)?,
        created_at_utc,
    };

    let path = staging_root.join(REPORT_NAME);
    let json = serde_json::to_string_pretty(&report).context("serializing build report")?;
    fs::write(&path, json)
        .with_context(|| format!("writing build report '{}'", path.display()))?;
    Ok(report)
}
