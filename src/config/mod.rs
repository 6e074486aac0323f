//! Configuration management for nezhactl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Application configuration.
///
/// Holds the dashboard location and credentials only. The bearer token
/// obtained from login is deliberately not part of the config: it lives in
/// the in-memory token cache and is never written to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the dashboard, e.g. `https://status.example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,

    /// Dashboard account name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Dashboard account password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".nezhactl").join("config.yaml"))
    }

    /// Resolve the config path, honoring an explicit override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path, or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an explicit path, or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Credentials live in this file; keep it private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Validate that everything needed for authenticated requests is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.dashboard_url.is_none() {
            return Err(ConfigError::MissingDashboardUrl.into());
        }
        if self.username.is_none() || self.password.is_none() {
            return Err(ConfigError::MissingCredentials.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn configured() -> Config {
        Config {
            dashboard_url: Some("https://status.example.com".to_string()),
            username: Some("admin".to_string()),
            password: Some("hunter2".to_string()),
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.dashboard_url.is_none());
        assert!(config.username.is_none());
        assert!(config.password.is_none());
        assert!(config.preferences.format.is_none());
    }

    #[test]
    fn test_validate_auth_complete() {
        assert!(configured().validate_auth().is_ok());
    }

    #[test]
    fn test_validate_auth_missing_url() {
        let mut config = configured();
        config.dashboard_url = None;

        match config.validate_auth().unwrap_err() {
            Error::Config(ConfigError::MissingDashboardUrl) => (),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_auth_missing_password() {
        let mut config = configured();
        config.password = None;

        match config.validate_auth().unwrap_err() {
            Error::Config(ConfigError::MissingCredentials) => (),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        configured().save_to(path.clone()).unwrap();
        let loaded = Config::load_from(path).unwrap();

        assert_eq!(
            loaded.dashboard_url.as_deref(),
            Some("https://status.example.com")
        );
        assert_eq!(loaded.username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(dir.path().join("absent.yaml")).unwrap_err();

        match err {
            Error::Config(ConfigError::NotFound) => (),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        configured().save_to(path.clone()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
