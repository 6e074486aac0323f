//! Mock dashboard client for testing
//!
//! Implements [`DashboardApi`] over in-memory fixtures so command handlers
//! can be tested without a dashboard.

use async_trait::async_trait;

use super::DashboardApi;
use super::models::{AlertRule, Server};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure responses via builder methods, then hand to code expecting a
/// `DashboardApi`.
#[derive(Default)]
pub struct MockDashboardClient {
    /// Servers returned from list_servers / get_server
    servers: Vec<Server>,
    /// Alert rules returned from list_alert_rules
    alert_rules: Vec<AlertRule>,
    /// When set, every call fails with this message as a ServerError
    failure: Option<String>,
}

impl MockDashboardClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_servers(mut self, servers: Vec<Server>) -> Self {
        self.servers = servers;
        self
    }

    pub fn with_alert_rules(mut self, alert_rules: Vec<AlertRule>) -> Self {
        self.alert_rules = alert_rules;
        self
    }

    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn check_failure(&self) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(ApiError::ServerError(message.clone()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl DashboardApi for MockDashboardClient {
    async fn list_servers(&self) -> Result<Vec<Server>> {
        self.check_failure()?;
        Ok(self.servers.clone())
    }

    async fn get_server(&self, id: u64) -> Result<Server> {
        self.check_failure()?;
        self.servers
            .iter()
            .find(|server| server.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Server {id}")).into())
    }

    async fn list_alert_rules(&self) -> Result<Vec<AlertRule>> {
        self.check_failure()?;
        Ok(self.alert_rules.clone())
    }
}
