//! Inventory commands: dashboard, groups, members and device details

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use jamf_cli::api::DeviceKind;
use jamf_cli::api::xml::NOT_AVAILABLE;
use jamf_cli::inventory;
use jamf_cli::session::Session;

use super::require_server;

#[derive(Subcommand)]
pub enum InventoryCommands {
    /// Overview counts for computers and mobile devices
    Dashboard,
    /// List computer or mobile device groups
    Groups {
        #[arg(value_enum)]
        kind: DeviceKind,
        /// Only show groups whose name contains this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },
    /// List the members of a group
    Members {
        #[arg(value_enum)]
        kind: DeviceKind,
        group_id: String,
    },
    /// Show general information about one computer or mobile device
    Info {
        #[arg(value_enum)]
        kind: DeviceKind,
        id: String,
    },
}

pub async fn handle_inventory_command(session: &Session, cmd: InventoryCommands) -> Result<()> {
    let server = require_server(session)?;
    println!("Server: {}\n", server.dimmed());

    match cmd {
        InventoryCommands::Dashboard => show_dashboard(session).await,
        InventoryCommands::Groups { kind, filter } => show_groups(session, kind, filter.as_deref()).await,
        InventoryCommands::Members { kind, group_id } => show_members(session, kind, &group_id).await,
        InventoryCommands::Info { kind, id } => show_info(session, kind, &id).await,
    }

    Ok(())
}

async fn show_dashboard(session: &Session) {
    let dashboard = inventory::dashboard(session).await;
    let width = dashboard.rows().iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    for (label, value) in dashboard.rows() {
        println!("  {:<width$}  {}", label.bold(), render_value(value), width = width);
    }
}

async fn show_groups(session: &Session, kind: DeviceKind, filter: Option<&str>) {
    let Some(mut summary) = inventory::fetch_groups(session, kind).await else {
        println!("  {}", "Groups unavailable (N/A)".bright_yellow());
        return;
    };
    if let Some(term) = filter {
        summary = summary.filtered(term);
    }

    if summary.groups.is_empty() {
        println!("  {}", "No groups found".bright_yellow());
        return;
    }

    println!("  {:<40} {:<8} {}", "Name".bold(), "Type".bold(), "ID".bold());
    for group in &summary.groups {
        println!("  {:<40} {:<8} {}", group.name, group.kind_label(), group.id.dimmed());
    }
    println!(
        "\n  {} smart, {} static",
        summary.smart_count.to_string().bright_cyan(),
        summary.static_count.to_string().bright_cyan()
    );
}

async fn show_members(session: &Session, kind: DeviceKind, group_id: &str) {
    match inventory::fetch_group_members(session, kind, group_id).await {
        Some(members) if members.is_empty() => println!("  {}", "Group has no members".bright_yellow()),
        Some(members) => {
            println!("  {:<40} {}", "Name".bold(), "ID".bold());
            for member in members {
                println!("  {:<40} {}", member.name, member.id.dimmed());
            }
        }
        None => println!("  {}", "Members unavailable (N/A)".bright_yellow()),
    }
}

async fn show_info(session: &Session, kind: DeviceKind, id: &str) {
    match inventory::fetch_general_info(session, kind, id).await {
        Some(info) => {
            let width = info.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
            for (key, value) in info {
                println!("  {:<width$}  {}", key.bold(), value, width = width);
            }
        }
        None => println!("  {}", "No information found.".bright_yellow()),
    }
}

fn render_value(value: &str) -> ColoredString {
    if value == NOT_AVAILABLE {
        value.bright_yellow()
    } else {
        value.bright_green().bold()
    }
}
