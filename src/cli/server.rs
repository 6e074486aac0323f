//! Server command implementations

use tabled::Tabled;

use crate::cli::args::OutputFormat;
use crate::cli::context::CommandContext;
use crate::client::{DashboardApi, Server};
use crate::error::Result;
use crate::output::{json, table};

/// Server row for table display
#[derive(Tabled)]
struct ServerDisplay {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PLATFORM")]
    platform: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "MEMORY")]
    memory: String,
    #[tabled(rename = "LOAD")]
    load: String,
    #[tabled(rename = "LAST ACTIVE")]
    last_active: String,
}

impl From<Server> for ServerDisplay {
    fn from(server: Server) -> Self {
        Self {
            id: server.id,
            name: server.name,
            platform: if server.host.platform.is_empty() {
                "-".to_string()
            } else {
                format!("{} {}", server.host.platform, server.host.platform_version)
                    .trim_end()
                    .to_string()
            },
            cpu: format!("{:.1}%", server.state.cpu),
            memory: format!(
                "{} / {}",
                format_bytes(server.state.mem_used),
                format_bytes(server.host.mem_total)
            ),
            load: format!(
                "{:.2} {:.2} {:.2}",
                server.state.load_1, server.state.load_5, server.state.load_15
            ),
            last_active: server.last_active.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Render a byte count with a binary unit suffix
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Run the server list command
pub async fn list(format: OutputFormat, config_path: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(config_path)?;
    let output = render_list(&ctx.client, format).await?;
    println!("{output}");
    Ok(())
}

/// Run the server get command
pub async fn get(id: u64, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(config_path)?;
    let output = render_get(&ctx.client, id, format).await?;
    println!("{output}");
    Ok(())
}

async fn render_list(client: &dyn DashboardApi, format: OutputFormat) -> Result<String> {
    let mut servers = client.list_servers().await?;
    servers.sort_by_key(|server| server.id);

    match format {
        OutputFormat::Table => {
            let rows: Vec<ServerDisplay> = servers.into_iter().map(ServerDisplay::from).collect();
            Ok(table::format_table(&rows))
        }
        OutputFormat::Json => Ok(json::format_json(servers)?),
    }
}

async fn render_get(client: &dyn DashboardApi, id: u64, format: OutputFormat) -> Result<String> {
    let server = client.get_server(id).await?;

    match format {
        OutputFormat::Table => {
            let rows = vec![ServerDisplay::from(server)];
            Ok(table::format_table(&rows))
        }
        OutputFormat::Json => Ok(json::format_json(server)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDashboardClient;
    use crate::client::models::{Host, State};
    use crate::error::{ApiError, Error};
    use chrono::{TimeZone, Utc};

    fn fixture(id: u64, name: &str) -> Server {
        Server {
            id,
            name: name.to_string(),
            last_active: Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap(),
            host: Host {
                platform: "debian".to_string(),
                platform_version: "12".to_string(),
                mem_total: 8 * 1024 * 1024 * 1024,
                ..Host::default()
            },
            state: State {
                cpu: 12.5,
                mem_used: 2 * 1024 * 1024 * 1024,
                load_1: 0.42,
                ..State::default()
            },
        }
    }

    #[tokio::test]
    async fn test_render_list_table() {
        let client = MockDashboardClient::new().with_servers(vec![
            fixture(2, "edge-02"),
            fixture(1, "edge-01"),
        ]);

        let output = render_list(&client, OutputFormat::Table).await.unwrap();

        assert!(output.contains("edge-01"));
        assert!(output.contains("edge-02"));
        assert!(output.contains("debian 12"));
        assert!(output.contains("12.5%"));
        // Sorted by ID
        assert!(output.find("edge-01").unwrap() < output.find("edge-02").unwrap());
    }

    #[tokio::test]
    async fn test_render_list_json() {
        let client = MockDashboardClient::new().with_servers(vec![fixture(1, "edge-01")]);

        let output = render_list(&client, OutputFormat::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["data"][0]["name"], "edge-01");
        assert_eq!(value["data"][0]["state"]["cpu"], 12.5);
    }

    #[tokio::test]
    async fn test_render_list_empty() {
        let client = MockDashboardClient::new();

        let output = render_list(&client, OutputFormat::Table).await.unwrap();
        assert_eq!(output, "No results.");
    }

    #[tokio::test]
    async fn test_render_get_unknown_id() {
        let client = MockDashboardClient::new().with_servers(vec![fixture(1, "edge-01")]);

        let err = render_get(&client, 9, OutputFormat::Table).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::NotFound(_))));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
        assert_eq!(format_bytes(8 * 1024 * 1024 * 1024), "8.0 GiB");
    }
}
