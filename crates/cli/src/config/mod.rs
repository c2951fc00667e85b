//! Command-line configuration

use clap::Parser;

use crate::{
    commands::Command,
    config::{api::ApiArgs, logging::LoggingConfig},
};

pub(crate) mod api;
pub(crate) mod logging;

/// Storefront command-line client
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront command-line client", long_about = None)]
pub(crate) struct CliConfig {
    /// Backend connection settings.
    #[command(flatten)]
    pub(crate) api: ApiArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
