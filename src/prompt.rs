//! Interactive input for arguments omitted on the command line.
//!
//! The build never reads stdin directly; it goes through [`InputSource`] so
//! tests (and future non-interactive callers) can inject values.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::cli::BuildOptions;
use crate::request::{Arch, BuildRequest, RuntimeVersion, SUPPORTED_VERSIONS};

/// Supplies the two values that may be missing from the command line.
pub trait InputSource {
    fn runtime_version(&mut self) -> Result<String>;
    fn architecture(&mut self) -> Result<String>;
}

/// Real interactive prompts on stdin/stdout.
pub struct StdinSource;

impl InputSource for StdinSource {
    fn runtime_version(&mut self) -> Result<String> {
        print!(
            "Python version ({}): ",
            SUPPORTED_VERSIONS.join(", ")
        );
        io::stdout().flush().context("flushing prompt")?;
        read_line()
    }

    fn architecture(&mut self) -> Result<String> {
        println!("Select target architecture:");
        println!("  1) ARM_64");
        println!("  2) AMD_86");
        print!("Choice: ");
        io::stdout().flush().context("flushing prompt")?;
        read_line()
    }
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading interactive input")?;
    Ok(line.trim().to_string())
}

/// Validate CLI inputs into a [`BuildRequest`], prompting for what's missing.
pub fn resolve_request(
    options: BuildOptions,
    input: &mut dyn InputSource,
) -> Result<BuildRequest> {
    let raw_version = match options.python_version {
        Some(v) => v,
        None => input.runtime_version()?,
    };
    let version = RuntimeVersion::parse(&raw_version)?;

    let raw_arch = match options.architecture {
        Some(a) => a,
        None => input.architecture()?,
    };
    let arch = Arch::parse(&raw_arch)?;

    Ok(BuildRequest {
        version,
        arch,
        requirements: options.requirements,
    })
}
