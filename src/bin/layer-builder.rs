use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use layer_builder::cli::{parse_args, usage, CliAction};
use layer_builder::prompt::{resolve_request, StdinSource};
use layer_builder::{run_build, BuildError};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            // Bad CLI input also gets the usage text, other failures don't.
            if let Some(BuildError::Validation(_)) = err.downcast_ref::<BuildError>() {
                eprintln!("\n{}", usage());
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();

    match parse_args(&args)? {
        CliAction::Help => {
            println!("{}", usage());
            Ok(ExitCode::SUCCESS)
        }
        CliAction::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        CliAction::Build(options) => {
            let mut input = StdinSource;
            let request = resolve_request(options, &mut input)?;
            let root = env::current_dir().context("resolving current directory")?;
            let outcome = run_build(&root, &request)?;
            println!("Layer archive created: {}", outcome.archive.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
