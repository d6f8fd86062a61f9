use super::commands::{InventoryCommands, RawCommands};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jamf-cli")]
#[command(about = "A CLI tool for browsing a Jamf Pro server", version)]
pub struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server URL, overriding the one saved by the last `auth`
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate against a server with the client credentials file
    Auth {
        /// Server URL; `https://` is assumed when no scheme is given
        server: Option<String>,
    },
    /// Show the saved server and token state
    Status,
    /// Delete the stored token
    Logout,
    #[command(flatten)]
    Inventory(InventoryCommands),
    /// Raw authenticated GET requests
    #[command(subcommand)]
    Raw(RawCommands),
}
