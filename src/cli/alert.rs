//! Alert command implementations

use tabled::Tabled;

use crate::cli::args::OutputFormat;
use crate::cli::context::CommandContext;
use crate::client::{AlertRule, DashboardApi};
use crate::error::Result;
use crate::output::{json, table};

/// Alert rule row for table display
#[derive(Tabled)]
struct AlertRuleDisplay {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ENABLED")]
    enabled: String,
    #[tabled(rename = "TRIGGER")]
    trigger: String,
}

impl From<AlertRule> for AlertRuleDisplay {
    fn from(rule: AlertRule) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            enabled: if rule.enable { "yes" } else { "no" }.to_string(),
            trigger: match rule.trigger_mode {
                0 => "continuous".to_string(),
                1 => "once".to_string(),
                other => other.to_string(),
            },
        }
    }
}

/// Run the alert list command
pub async fn list(format: OutputFormat, config_path: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(config_path)?;
    let output = render_list(&ctx.client, format).await?;
    println!("{output}");
    Ok(())
}

async fn render_list(client: &dyn DashboardApi, format: OutputFormat) -> Result<String> {
    let rules = client.list_alert_rules().await?;

    match format {
        OutputFormat::Table => {
            let rows: Vec<AlertRuleDisplay> =
                rules.into_iter().map(AlertRuleDisplay::from).collect();
            Ok(table::format_table(&rows))
        }
        OutputFormat::Json => Ok(json::format_json(rules)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDashboardClient;

    fn rule(id: u64, name: &str, enable: bool) -> AlertRule {
        AlertRule {
            id,
            name: name.to_string(),
            enable,
            trigger_mode: 0,
            notification_group_id: 1,
        }
    }

    #[tokio::test]
    async fn test_render_list_table() {
        let client = MockDashboardClient::new()
            .with_alert_rules(vec![rule(1, "cpu high", true), rule(2, "offline", false)]);

        let output = render_list(&client, OutputFormat::Table).await.unwrap();

        assert!(output.contains("cpu high"));
        assert!(output.contains("yes"));
        assert!(output.contains("continuous"));
    }

    #[tokio::test]
    async fn test_render_list_json() {
        let client = MockDashboardClient::new().with_alert_rules(vec![rule(1, "cpu high", true)]);

        let output = render_list(&client, OutputFormat::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["data"][0]["name"], "cpu high");
        assert_eq!(value["data"][0]["enable"], true);
    }

    #[tokio::test]
    async fn test_render_list_surfaces_api_failure() {
        let client = MockDashboardClient::new().with_failure("maintenance");

        assert!(render_list(&client, OutputFormat::Table).await.is_err());
    }
}
