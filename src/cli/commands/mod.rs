pub mod auth;
pub mod inventory;
pub mod raw;

pub use auth::{auth_command, logout_command, status_command};
pub use inventory::{InventoryCommands, handle_inventory_command};
pub use raw::{RawCommands, handle_raw_command};

use jamf_cli::session::Session;

/// Resolve the server for commands that need one, or explain how to set it
pub(crate) fn require_server(session: &Session) -> anyhow::Result<&str> {
    session.base_url().ok_or_else(|| {
        anyhow::anyhow!("No server configured. Run 'jamf-cli auth <url>' first or pass --url.")
    })
}
