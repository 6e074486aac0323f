//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::client::DashboardClient;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the dashboard location and credentials, verifies them with a
/// real login, and saves the config. The bearer token from the verification
/// login is discarded with the process; only credentials are persisted.
pub async fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to nezhactl!".bold().green());
    println!("Let's connect to your Nezha dashboard.\n");

    let dashboard_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Dashboard URL (e.g. https://status.example.com)")
        .validate_with(|input: &String| {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        })
        .interact_text()?;

    let username: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Username")
        .interact_text()?;

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    println!("\n{}", "Verifying credentials...".cyan());
    let client = DashboardClient::new(&dashboard_url, &username, &password)?;
    client.authenticate().await?;
    println!("{}", "✓ Login successful!".green());

    // Keep unrelated settings if a config already exists
    let mut config = Config::load_at(config_path).unwrap_or_default();
    config.dashboard_url = Some(dashboard_url);
    config.username = Some(username);
    config.password = Some(password);
    config.save_at(config_path)?;

    let path = Config::resolve_path(config_path)?;
    println!(
        "\nConfiguration saved to {}",
        path.display().to_string().cyan()
    );
    println!("Try {} to see your fleet.", "nezhactl server list".bold());

    Ok(())
}
