use anyhow::Result;
use clap::Parser;
use jamf_cli::config::AppConfig;
use jamf_cli::session::Session;
use log::{LevelFilter, debug, info};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)?;
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.target(env_logger::Target::Pipe(Box::new(log_file))).init();

    info!("Starting jamf-cli");
    debug!("Using config: {:?}", config);

    let mut session = Session::from_config(&config)?;
    match &cli.url {
        Some(url) => session.set_base_url(url),
        None => {
            session.restore_url();
        }
    }

    match cli.command {
        Commands::Auth { server } => cli::commands::auth_command(&mut session, server).await?,
        Commands::Status => cli::commands::status_command(&session)?,
        Commands::Logout => cli::commands::logout_command(&session)?,
        Commands::Inventory(cmd) => cli::commands::handle_inventory_command(&session, cmd).await?,
        Commands::Raw(cmd) => cli::commands::handle_raw_command(&session, cmd).await?,
    }

    Ok(())
}
