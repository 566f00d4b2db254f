//! Command-line parsing.
//!
//! Leading flags are consumed first, then up to two positionals
//! (`[python_version] [architecture]`). Anything unrecognized is a
//! validation failure; the binary prints usage alongside it.

use std::path::PathBuf;

use crate::error::BuildError;
use crate::request::DEFAULT_REQUIREMENTS;

pub fn usage() -> &'static str {
    "Usage:\n  layer-builder [options] [python_version] [architecture]\n\nArguments:\n  python_version     e.g. 3.12 (prompted if omitted)\n  architecture       1/ARM_64 or 2/AMD_86 (prompted if omitted)\n\nOptions:\n  -r, --requirements <path>  requirements file (default: requirements.txt)\n  -h, --help                 show this help\n  -v, --version              show version"
}

/// What the invocation asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Help,
    Version,
    Build(BuildOptions),
}

/// Raw (not yet validated) build inputs from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub python_version: Option<String>,
    pub architecture: Option<String>,
    pub requirements: PathBuf,
}

/// Parse argv (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliAction, BuildError> {
    let mut requirements = PathBuf::from(DEFAULT_REQUIREMENTS);
    let mut positionals: Vec<String> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if positionals.is_empty() && arg.starts_with('-') {
            match arg.as_str() {
                "-h" | "--help" => return Ok(CliAction::Help),
                "-v" | "--version" => return Ok(CliAction::Version),
                "-r" | "--requirements" => {
                    let value = iter.next().ok_or_else(|| {
                        BuildError::validation("option '--requirements' requires a path argument")
                    })?;
                    requirements = PathBuf::from(value);
                }
                flag => {
                    return Err(BuildError::validation(format!("unknown option '{flag}'")));
                }
            }
        } else {
            positionals.push(arg.clone());
        }
    }

    if positionals.len() > 2 {
        return Err(BuildError::validation(format!(
            "too many arguments: expected at most [python_version] [architecture], got {}",
            positionals.len()
        )));
    }

    Ok(CliAction::Build(BuildOptions {
        python_version: positionals.first().cloned(),
        architecture: positionals.get(1).cloned(),
        requirements,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn help_and_version_flags_short_circuit() {
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), CliAction::Help);
        assert_eq!(parse_args(&args(&["--help"])).unwrap(), CliAction::Help);
        assert_eq!(parse_args(&args(&["-v"])).unwrap(), CliAction::Version);
        assert_eq!(
            parse_args(&args(&["--version"])).unwrap(),
            CliAction::Version
        );
    }

    #[test]
    fn positionals_become_raw_build_inputs() {
        let CliAction::Build(opts) = parse_args(&args(&["3.11", "ARM_64"])).unwrap() else {
            panic!("expected build action");
        };
        assert_eq!(opts.python_version.as_deref(), Some("3.11"));
        assert_eq!(opts.architecture.as_deref(), Some("ARM_64"));
        assert_eq!(opts.requirements, PathBuf::from("requirements.txt"));
    }

    #[test]
    fn missing_positionals_stay_unset_for_prompting() {
        let CliAction::Build(opts) = parse_args(&args(&[])).unwrap() else {
            panic!("expected build action");
        };
        assert!(opts.python_version.is_none());
        assert!(opts.architecture.is_none());
    }

    #[test]
    fn requirements_flag_overrides_default() {
        let CliAction::Build(opts) =
            parse_args(&args(&["-r", "deps/prod.txt", "3.12", "2"])).unwrap()
        else {
            panic!("expected build action");
        };
        assert_eq!(opts.requirements, PathBuf::from("deps/prod.txt"));
        assert_eq!(opts.python_version.as_deref(), Some("3.12"));
        assert_eq!(opts.architecture.as_deref(), Some("2"));
    }

    #[test]
    fn requirements_flag_without_value_fails() {
        let err = parse_args(&args(&["--requirements"])).unwrap_err();
        assert!(err.to_string().contains("requires a path"));
    }

    #[test]
    fn unknown_flags_fail_validation() {
        let err = parse_args(&args(&["--frobnicate"])).unwrap_err();
        assert!(err.to_string().contains("unknown option '--frobnicate'"));
    }

    #[test]
    fn extra_positionals_fail_validation() {
        let err = parse_args(&args(&["3.11", "ARM_64", "extra"])).unwrap_err();
        assert!(err.to_string().contains("too many arguments"));
    }
}
