//! Serde models for the dashboard API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard dashboard response envelope: payload under `data`, which is
/// absent or null on failure
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,

    pub data: Option<T>,

    /// Error detail supplied by some dashboard builds
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of the login request
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Payload of a successful login response
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// A monitored server in the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Server ID
    pub id: u64,

    /// Display name
    pub name: String,

    /// Last agent report time
    pub last_active: DateTime<Utc>,

    /// Static host facts reported by the agent
    #[serde(default)]
    pub host: Host,

    /// Live metrics from the most recent report
    #[serde(default)]
    pub state: State,
}

/// Static host information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Host {
    #[serde(default)]
    pub platform: String,

    #[serde(default)]
    pub platform_version: String,

    #[serde(default)]
    pub arch: String,

    /// CPU model strings, one per socket
    #[serde(default)]
    pub cpu: Vec<String>,

    /// Total memory in bytes
    #[serde(default)]
    pub mem_total: u64,

    /// Total disk in bytes
    #[serde(default)]
    pub disk_total: u64,

    /// Boot time as a Unix timestamp
    #[serde(default)]
    pub boot_time: u64,
}

/// Live metrics for a server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct State {
    /// CPU usage percentage
    #[serde(default)]
    pub cpu: f64,

    /// Used memory in bytes
    #[serde(default)]
    pub mem_used: u64,

    /// Used disk in bytes
    #[serde(default)]
    pub disk_used: u64,

    /// Cumulative inbound traffic in bytes
    #[serde(default)]
    pub net_in_transfer: u64,

    /// Cumulative outbound traffic in bytes
    #[serde(default)]
    pub net_out_transfer: u64,

    /// Inbound speed in bytes/s
    #[serde(default)]
    pub net_in_speed: u64,

    /// Outbound speed in bytes/s
    #[serde(default)]
    pub net_out_speed: u64,

    /// Uptime in seconds
    #[serde(default)]
    pub uptime: u64,

    #[serde(default)]
    pub load_1: f64,

    #[serde(default)]
    pub load_5: f64,

    #[serde(default)]
    pub load_15: f64,

    #[serde(default)]
    pub process_count: u64,
}

/// An alert rule configured on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    /// Rule ID
    pub id: u64,

    /// Rule name
    pub name: String,

    /// Whether the rule is active
    #[serde(default)]
    pub enable: bool,

    /// 0 = always fire while matching, 1 = fire once per incident
    #[serde(default)]
    pub trigger_mode: i64,

    /// Notification group the rule reports to
    #[serde(default)]
    pub notification_group_id: u64,
}
