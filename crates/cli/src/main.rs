//! Storefront command-line client

use std::{error::Error, io, process::ExitCode, sync::Arc};

use tokio::signal;
use tracing::debug;

use storefront::{context::StorefrontContext, http::CancelScope};

use crate::{commands::Invocation, config::CliConfig};

mod commands;
mod config;
mod errors;
mod logging;
mod widget;

/// Storefront command-line client entry point
#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(error) => {
            // Help and version requests also arrive here
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = logging::init(&config.logging) {
        report(&error);

        return ExitCode::FAILURE;
    }

    let context = match StorefrontContext::from_config(
        &config.api.api_config(),
        config.api.session_file.clone(),
    ) {
        Ok(context) => context,
        Err(init_error) => {
            report(&init_error);

            return ExitCode::FAILURE;
        }
    };

    let scope = Arc::new(CancelScope::new());

    // Abandon in-flight requests on Ctrl+C
    tokio::spawn({
        let scope = Arc::clone(&scope);

        async move {
            if signal::ctrl_c().await.is_ok() {
                debug!("interrupted, cancelling pending requests");

                scope.cancel();
            }
        }
    });

    let invocation = Invocation::new(context, scope.token(), io::stdout().lock());

    match invocation.run(config.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(command_error) => {
            report(&command_error);

            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "command failures are reported to the user, not only to the log"
)]
fn report(error: &dyn Error) {
    eprintln!("error: {error}");

    let mut source = error.source();

    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");

        source = cause.source();
    }
}
