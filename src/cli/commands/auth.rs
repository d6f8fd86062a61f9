//! Authentication commands

use anyhow::Result;
use colored::*;
use jamf_cli::auth::AuthState;
use jamf_cli::session::{AuthOutcome, Session};

/// Run the authenticate transition and print the resulting status
pub async fn auth_command(session: &mut Session, url: Option<String>) -> Result<()> {
    let url = match url.or_else(|| session.base_url().map(str::to_string)) {
        Some(url) => url,
        None => anyhow::bail!("No server URL given and none saved. Usage: jamf-cli auth <url>"),
    };

    let outcome = session.authenticate(&url).await;
    match outcome {
        AuthOutcome::Authenticated => {
            println!(
                "{} {}",
                outcome.label().bright_green().bold(),
                session.base_url().unwrap_or_default().dimmed()
            );
        }
        AuthOutcome::Failed => {
            println!("{}", outcome.label().bright_red().bold());
            println!("  {}", "See the log file for details.".dimmed());
        }
    }

    Ok(())
}

pub fn status_command(session: &Session) -> Result<()> {
    match session.base_url() {
        Some(url) => println!("Server: {}", url.bright_green().bold()),
        None => println!("Server: {}", "not set".bright_yellow()),
    }

    let state = session.status();
    let label = state.label();
    match state {
        AuthState::Authenticated { expiry } => {
            println!("Token:  {} (expires {})", label.bright_green().bold(), expiry.to_rfc3339());
        }
        AuthState::Expired { expiry } => {
            println!(
                "Token:  {} at {} (renewed on next request)",
                label.bright_yellow().bold(),
                expiry.to_rfc3339()
            );
        }
        AuthState::Unauthenticated => {
            println!("Token:  {}", label.bright_red().bold());
        }
    }

    Ok(())
}

pub fn logout_command(session: &Session) -> Result<()> {
    if session.logout() {
        println!("{} Token cleared", "✓".bright_green().bold());
    } else {
        println!("{} Could not clear the token, see the log file", "✗".bright_red().bold());
    }
    Ok(())
}
