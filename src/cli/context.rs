//! Command execution context
//!
//! Bundles config loading, validation, and client construction so command
//! handlers do not repeat the wiring.

use crate::client::DashboardClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config and client
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// API client owning the in-memory token cache
    pub client: DashboardClient,
}

impl CommandContext {
    /// Load config from `config_path` (or the default location), validate it,
    /// and construct the API client.
    ///
    /// No network traffic happens here: the client logs in lazily the first
    /// time a request needs a bearer token.
    pub fn new(config_path: Option<&str>) -> Result<Self> {
        let config = Config::load_at(config_path)?;
        config.validate_auth()?;

        let client = DashboardClient::new(
            config.dashboard_url.as_deref().expect("validated above"),
            config.username.as_deref().expect("validated above"),
            config.password.as_deref().expect("validated above"),
        )?;

        Ok(Self { config, client })
    }
}
