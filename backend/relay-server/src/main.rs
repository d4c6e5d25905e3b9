use relay_config::Config;
use relay_hub::ShutdownCoordinator;
use relay_server::{Cli, Relay, logger};

use std::error::Error;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load and validate configuration
    let config_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => Config::config_dir()?,
    };
    let mut config = Config::load_from(&config_dir)?;
    cli.apply(&mut config);
    config.validate()?;

    let log_file_path = if let Some(ref filename) = config.logging.file {
        let log_dir = config_dir.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting relay-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let shutdown = ShutdownCoordinator::new();

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let relay = Relay::bind(&config, shutdown).await?;
    if let Err(e) = relay.serve().await {
        error!("{e}");
        return Err(e.into());
    }

    Ok(())
}
