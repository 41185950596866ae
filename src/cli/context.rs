//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, authentication validation, and client initialization.

use std::sync::Arc;

use clap::ValueEnum;
use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::models::{NamedUser, Repository, Team};
use crate::client::{GithubClient, Requester};
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration with env and flag overrides applied
    pub config: Config,
    /// Shared HTTP collaborator handed to every entity
    pub requester: Arc<dyn Requester>,
    /// Output format preference
    pub format: OutputFormat,
}

/// Flag or env first, then the configured preference, then pretty.
fn resolve_format(flag: Option<OutputFormat>, preference: Option<&str>) -> Result<OutputFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match preference {
        Some(name) => OutputFormat::from_str(name, true).map_err(|_| {
            ConfigError::Invalid(format!(
                "unknown output format '{}' in preferences (expected pretty, table or json)",
                name
            ))
            .into()
        }),
        None => Ok(OutputFormat::default()),
    }
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Precedence: `--api-host` flag, then `GHTEAM_TOKEN`/`GHTEAM_API_HOST`,
    /// then the config file. The output format follows `--format` /
    /// `GHTEAM_FORMAT`, then `preferences.format`. A missing config file is
    /// fine as long as a token arrives through the environment.
    ///
    /// # Errors
    /// Returns error if the config file is unreadable, no token is available,
    /// or the preferred format is unknown.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = match Config::load_at(opts.config_ref()) {
            Ok(config) => config,
            Err(crate::error::Error::Config(ConfigError::NotFound)) => {
                debug!("No config file; relying on environment");
                Config::default()
            }
            Err(err) => return Err(err),
        };
        let config = config
            .with_env_overrides()
            .with_overrides(None, opts.api_host.clone());
        config.validate_auth()?;
        let format = resolve_format(opts.format, config.preferences.format.as_deref())?;

        let client = GithubClient::new(config.token.clone(), config.api_host.clone())?;
        debug!("Using API at {}", client.base_url());

        Ok(Self {
            config,
            requester: Arc::new(client),
            format,
        })
    }

    /// Page size from preferences
    pub fn per_page(&self) -> usize {
        self.config.preferences.per_page
    }

    /// A not-yet-fetched team handle
    pub fn team(&self, id: u64) -> Team {
        Team::from_id(Arc::clone(&self.requester), id)
    }

    /// A not-yet-fetched user handle
    pub fn user(&self, login: &str) -> NamedUser {
        NamedUser::from_login(Arc::clone(&self.requester), login)
    }

    /// A not-yet-fetched repository handle, validating `owner/name`
    pub fn repo(&self, full_name: &str) -> Result<Repository> {
        Repository::from_full_name(Arc::clone(&self.requester), full_name)
    }
}
