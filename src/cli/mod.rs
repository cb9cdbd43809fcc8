//! CLI support for jsonpp
//!
//! Provides programmatic access to the `jsonpp` command for embedding in
//! other tools. Nothing here adds language semantics; it only wires input
//! and options into [`crate::compile_with`].

mod check;
mod convert;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::value_to_json;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Compile(#[from] crate::CompileError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Pass a document, use --file, or pipe JSON++ to stdin.")]
    NoInput,
}
