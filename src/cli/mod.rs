//! CLI module for aerorsql
//!
//! Provides command-line interface for:
//! - translate: One-shot filter tree translation
//! - operators: List the operator symbol table

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    handle_translate, load_config, operator_listing, operators, run, run_command, translate,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
