use crate::commands::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pi")]
#[command(about = "Device player identity: bootstrap, inspect and refresh")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (defaults to $PI_CONFIG_DIR, then ./.pi)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Override logging.level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
