//! CLI command definitions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use drivebox_core::config::AppConfig;
use drivebox_core::config::logging::LoggingConfig;

/// Drivebox — file and folder hub with trash and sharing.
#[derive(Debug, Parser)]
#[command(name = "drivebox", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API server.
    Serve {
        /// Configuration environment overlay to load (config/<env>.toml).
        #[arg(long, default_value = "default")]
        env: String,
    },
    /// Load the configuration and print the effective values.
    ConfigCheck {
        /// Configuration environment overlay to load.
        #[arg(long, default_value = "default")]
        env: String,
    },
}

impl Cli {
    /// Run the selected command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Command::Serve { env } => {
                let config = AppConfig::load(&env)?;
                init_tracing(&config.logging);
                drivebox_api::serve(config).await?;
            }
            Command::ConfigCheck { env } => {
                let config = AppConfig::load(&env)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        Ok(())
    }
}

/// Initialize the tracing subscriber from the logging configuration.
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
