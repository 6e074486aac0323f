//! Status command implementation

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "nezhactl Configuration Status".bold());

    match Config::load_at(config_path) {
        Ok(config) => {
            let path = Config::resolve_path(config_path)?;
            println!("Config file: {}", path.display().to_string().cyan());
            println!();

            match &config.dashboard_url {
                Some(url) => println!("{} Dashboard: {}", "✓".green(), url),
                None => {
                    println!("{} Dashboard URL not configured", "✗".red());
                    println!("  → Run 'nezhactl init' to configure");
                }
            }

            if config.username.is_some() && config.password.is_some() {
                println!(
                    "{} Credentials configured (user: {})",
                    "✓".green(),
                    config.username.as_deref().unwrap_or("")
                );
            } else {
                println!("{} Credentials not configured", "✗".red());
                println!("  → Run 'nezhactl init' to configure");
            }
        }
        Err(_) => {
            println!("{} No configuration found", "✗".red());
            println!("  → Run 'nezhactl init' to get started");
        }
    }

    Ok(())
}
