//! pstore - propstore command-line tool
//!
//! Loads a properties file into an in-process store and answers queries
//! against it.

use clap::Parser;
use propstore::cli::Cli;
use propstore::config::{load_settings, Settings};
use propstore::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Load settings and apply command-line overrides
    let settings = match load_settings() {
        Ok(mut settings) => {
            cli.apply_overrides(&mut settings);
            settings
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(settings.debug, cli.log_json);

    // Execute the command
    if let Err(e) = run(cli, settings).await {
        error!("Error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<()> {
    info!("Starting pstore");

    cli.execute(settings).await?;

    Ok(())
}

fn init_logging(debug: bool, json: bool) {
    let default_filter = if debug { "propstore=debug" } else { "propstore=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
