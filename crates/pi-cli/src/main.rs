//! pi - device player identity CLI
//!
//! # Examples
//!
//! ```bash
//! # Create or load this device's player
//! pi bootstrap --pretty
//!
//! # Inspect the stored id without touching the network
//! pi status
//!
//! # Keep the profile fresh until Ctrl-C
//! pi watch --log-level debug
//! ```

use pi_cli::{Cli, CliResult, Commands, app, logger, output};
use pi_config::{Config, LogLevel};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut config = match &cli.config_dir {
        Some(dir) => Config::load_from(dir)?,
        None => Config::load()?,
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = LogLevel::parse_lenient(level);
    }
    config.validate()?;

    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|file| config.root().join(file));
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;
    config.log_summary();

    if cli.command == Commands::Watch {
        return app::watch(&config, cli.pretty).await;
    }

    let value = app::execute(&cli.command, &config).await?;
    println!("{}", output::render(&value, cli.pretty)?);
    Ok(())
}
