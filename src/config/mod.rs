//! Configuration management for ghteam

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Environment variable overriding the configured token
pub const TOKEN_ENV: &str = "GHTEAM_TOKEN";

/// Environment variable overriding the configured API host
pub const API_HOST_ENV: &str = "GHTEAM_API_HOST";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub personal access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API root for GitHub Enterprise, e.g. `https://github.example.com/api/v3`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Page size for list requests
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_per_page() -> usize {
    30
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            per_page: default_per_page(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".ghteam").join("config.yaml"))
    }

    /// Resolve an optional override against the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to `path`, or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file holds a token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Apply `GHTEAM_TOKEN` / `GHTEAM_API_HOST` on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(API_HOST_ENV).ok(),
        )
    }

    /// Apply non-empty overrides on top of the file values.
    pub fn with_overrides(mut self, token: Option<String>, api_host: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        if let Some(host) = api_host.filter(|h| !h.is_empty()) {
            self.api_host = Some(host);
        }
        self
    }

    /// Validate that a token is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(ConfigError::MissingToken.into());
        }
        Ok(())
    }

    /// Token with everything but the last four characters masked
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|token| {
            let visible: String = token
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{}", visible)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.token.is_none());
        assert!(config.api_host.is_none());
        assert_eq!(config.preferences.per_page, 30);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        let config = Config {
            token: Some("ghp_abcdef".to_string()),
            api_host: None,
            preferences: Preferences {
                format: Some("json".to_string()),
                per_page: 50,
            },
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.token.as_deref(), Some("ghp_abcdef"));
        assert_eq!(loaded.preferences.format.as_deref(), Some("json"));
        assert_eq!(loaded.preferences.per_page, 50);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("api_host"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        Config::default().save_to(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp = tempdir().unwrap();
        let err = Config::load_from(&temp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound)));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "token: [unterminated").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_preferences_default_when_absent() {
        let config: Config = serde_yaml::from_str("token: abc\n").unwrap();
        assert_eq!(config.preferences.per_page, 30);
        assert!(config.preferences.format.is_none());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let config = Config {
            token: Some("from-file".into()),
            ..Config::default()
        }
        .with_overrides(Some("from-env".into()), Some("http://localhost:8080".into()));
        assert_eq!(config.token.as_deref(), Some("from-env"));
        assert_eq!(config.api_host.as_deref(), Some("http://localhost:8080"));

        let untouched = Config {
            token: Some("from-file".into()),
            ..Config::default()
        }
        .with_overrides(Some(String::new()), None);
        assert_eq!(untouched.token.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_validate_auth_requires_token() {
        assert!(matches!(
            Config::default().validate_auth(),
            Err(Error::Config(ConfigError::MissingToken))
        ));
    }

    #[test]
    fn test_masked_token() {
        let config = Config {
            token: Some("ghp_1234567890abcd".into()),
            ..Config::default()
        };
        assert_eq!(config.masked_token().as_deref(), Some("****abcd"));
    }
}
