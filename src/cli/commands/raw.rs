//! Raw authenticated GET requests against either API surface

use anyhow::Result;
use clap::Subcommand;
use jamf_cli::session::Session;

use super::require_server;

#[derive(Subcommand)]
pub enum RawCommands {
    /// GET a classic API resource (XML), e.g. `computers/id/7`
    Classic { endpoint: String },
    /// GET a modern API resource (JSON), e.g. `jamf-pro-version`
    Api { endpoint: String },
}

pub async fn handle_raw_command(session: &Session, cmd: RawCommands) -> Result<()> {
    require_server(session)?;

    match cmd {
        RawCommands::Classic { endpoint } => match session.classic(&endpoint).await {
            Some(xml) => println!("{}", xml),
            None => anyhow::bail!("Request to '{}' failed, see the log file for details", endpoint),
        },
        RawCommands::Api { endpoint } => match session.modern(&endpoint).await {
            Some(json) => println!("{}", serde_json::to_string_pretty(&json)?),
            None => anyhow::bail!("Request to '{}' failed, see the log file for details", endpoint),
        },
    }

    Ok(())
}
