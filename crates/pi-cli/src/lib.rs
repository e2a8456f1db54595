//! pi-cli library
//!
//! Command wiring for the `pi` binary, exported for tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod output;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
