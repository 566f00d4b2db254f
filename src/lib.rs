//! Build AWS Lambda layers from Python dependency manifests.
//!
//! This crate is a thin orchestration layer over two external tools: pip
//! (cross-platform binary-only installs) and zip (archive creation). It
//! validates the requested runtime version and target architecture, stages
//! packages into the layout Lambda expects, and produces
//! `layers/aws_lambda_layer.zip` plus a JSON build report.
//!
//! # Pipeline
//!
//! ```text
//! validate request ──> preflight tools ──> check manifest
//!        │
//!        └─> prepare staging ──> pip install ──> verify install
//!                  │
//!                  └─> zip archive ──> verify archive ──> build report
//! ```
//!
//! Every step is fail-fast; see [`error::BuildError`] for the failure
//! taxonomy.

pub mod archive;
pub mod build;
pub mod cli;
pub mod error;
pub mod installer;
pub mod preflight;
pub mod prompt;
pub mod report;
pub mod request;
pub mod staging;

pub use build::{run_build, BuildOutcome};
pub use error::BuildError;
pub use request::{Arch, BuildRequest, RuntimeVersion};
