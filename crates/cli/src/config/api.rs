//! Backend Connection Config

use std::{path::PathBuf, time::Duration};

use clap::Args;

use storefront::http::ApiConfig;

/// Backend connection settings.
#[derive(Debug, Args)]
pub(crate) struct ApiArgs {
    /// Storefront backend origin
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:3001")]
    pub(crate) api_url: String,

    /// Per-request timeout in seconds; 0 disables the timeout
    #[arg(long, env = "STOREFRONT_REQUEST_TIMEOUT_SECS", default_value_t = 30_u64)]
    pub(crate) request_timeout_secs: u64,

    /// Where the signed-in session is cached between invocations
    #[arg(
        long,
        env = "STOREFRONT_SESSION_FILE",
        default_value = ".storefront/session.json"
    )]
    pub(crate) session_file: PathBuf,
}

impl ApiArgs {
    pub(crate) fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_disables_it() {
        let args = ApiArgs {
            api_url: "http://localhost:3001".to_owned(),
            request_timeout_secs: 0,
            session_file: PathBuf::from("session.json"),
        };

        assert_eq!(args.api_config().timeout, None);
    }

    #[test]
    fn timeout_is_in_seconds() {
        let args = ApiArgs {
            api_url: "http://localhost:3001".to_owned(),
            request_timeout_secs: 5,
            session_file: PathBuf::from("session.json"),
        };

        assert_eq!(args.api_config().timeout, Some(Duration::from_secs(5)));
    }
}
