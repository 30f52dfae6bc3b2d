//! Credential and endpoint configuration loaded from CLI, environment, and
//! files.
//!
//! # Precedence
//!
//! Values are merged with the following precedence (lowest to highest):
//!
//! 1. **Defaults** – nothing is set; the public API is used
//! 2. **Configuration file** – `.repo-pulse.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `REPO_PULSE_USERNAME`, `REPO_PULSE_TOKEN`,
//!    `REPO_PULSE_API_URL` and `REPO_PULSE_GITHUB_HOST`
//! 4. **Command-line flags** – `--username`/`-u`, `--token`/`-t`,
//!    `--api-url` and `--github-host`
//!
//! When neither layer supplies a username or token, the legacy
//! `GITHUB_USERNAME` and `GITHUB_TOKEN` variables are consulted.
//!
//! # Configuration File
//!
//! ```toml
//! username = "octocat"
//! token = "ghp_example"
//! github_host = "ghe.example.com"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::ActivityError;
use crate::github::locator::{ApiBase, BasicCredentials, PersonalAccessToken};

/// Legacy variable holding the Basic-Auth username.
pub const LEGACY_USERNAME_VARIABLE: &str = "GITHUB_USERNAME";

/// Legacy variable holding the personal access token.
pub const LEGACY_TOKEN_VARIABLE: &str = "GITHUB_TOKEN";

/// Layered configuration for authenticating against the GitHub API.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use repo_pulse::RepoPulseConfig;
///
/// let config = RepoPulseConfig::load().expect("failed to load configuration");
/// let credentials = config.credentials().expect("credentials required");
/// let api_base = config.api_base().expect("valid API base");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REPO_PULSE",
    discovery(
        dotfile_name = ".repo-pulse.toml",
        config_file_name = "repo-pulse.toml",
        app_name = "repo-pulse"
    )
)]
pub struct RepoPulseConfig {
    /// Username sent with Basic authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--username <NAME>` or `-u <NAME>`
    /// - Environment: `REPO_PULSE_USERNAME` or `GITHUB_USERNAME` (legacy)
    /// - Config file: `username = "..."`
    #[ortho_config(cli_short = 'u')]
    pub username: Option<String>,

    /// Personal access token sent with Basic authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REPO_PULSE_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Explicit REST API root, used verbatim.
    #[ortho_config()]
    pub api_url: Option<String>,

    /// Web host of a GitHub Enterprise Server installation.
    ///
    /// Ignored when `api_url` is set.
    #[ortho_config()]
    pub github_host: Option<String>,
}

impl RepoPulseConfig {
    /// Resolves the username, falling back to `GITHUB_USERNAME`.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::MissingCredentials`] when no source provides
    /// a value.
    pub fn resolve_username(&self) -> Result<String, ActivityError> {
        resolve_with_legacy(self.username.as_deref(), LEGACY_USERNAME_VARIABLE)
    }

    /// Resolves the token, falling back to `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::MissingCredentials`] when no source provides
    /// a value.
    pub fn resolve_token(&self) -> Result<String, ActivityError> {
        resolve_with_legacy(self.token.as_deref(), LEGACY_TOKEN_VARIABLE)
    }

    /// Builds validated Basic-Auth credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::MissingCredentials`] when either value is
    /// missing or blank.
    pub fn credentials(&self) -> Result<BasicCredentials, ActivityError> {
        let token = PersonalAccessToken::new(self.resolve_token()?)?;
        BasicCredentials::new(self.resolve_username()?, token)
    }

    /// Chooses the API base: `api_url`, then `github_host`, then the public
    /// API.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidUrl`] when the configured value cannot
    /// be parsed.
    pub fn api_base(&self) -> Result<ApiBase, ActivityError> {
        match (self.api_url.as_deref(), self.github_host.as_deref()) {
            (Some(url), _) => ApiBase::parse(url),
            (None, Some(host)) => ApiBase::for_host(host),
            (None, None) => ApiBase::public(),
        }
    }
}

fn resolve_with_legacy(
    configured: Option<&str>,
    variable: &'static str,
) -> Result<String, ActivityError> {
    configured
        .map(str::to_owned)
        .or_else(|| env::var(variable).ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or(ActivityError::MissingCredentials { variable })
}
