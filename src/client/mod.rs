//! Dashboard API client

use async_trait::async_trait;

use crate::error::Result;

pub mod dashboard;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod token;

pub use dashboard::DashboardClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockDashboardClient;
pub use models::{AlertRule, Server};

/// Read operations against the dashboard API.
///
/// Authentication is internal to implementations: every call presents a
/// bearer token obtained from the token cache, refreshing it as needed.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// List all servers in the fleet
    async fn list_servers(&self) -> Result<Vec<Server>>;

    /// Fetch a single server by ID
    async fn get_server(&self, id: u64) -> Result<Server>;

    /// List configured alert rules
    async fn list_alert_rules(&self) -> Result<Vec<AlertRule>>;
}
