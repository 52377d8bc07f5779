// Configuration management
use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FEDERATION_URL: &str = "https://signin.aws.amazon.com/federation";
pub const DEFAULT_CONSOLE_URL: &str = "https://console.aws.amazon.com/";
pub const DEFAULT_ISSUER: &str = "aws-console-cli";

/// Federation rejects sessions longer than 12 hours
pub const MAX_SESSION_DURATION: i32 = 43200;
pub const MIN_SESSION_DURATION: i32 = 900;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    #[serde(default = "default_session_duration")]
    pub session_duration: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_federation_url")]
    pub federation_url: String,
    #[serde(default = "default_console_url")]
    pub console_url: String,
}

fn default_session_duration() -> i32 {
    MAX_SESSION_DURATION
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_federation_url() -> String {
    DEFAULT_FEDERATION_URL.to_string()
}

fn default_console_url() -> String {
    DEFAULT_CONSOLE_URL.to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            session_duration: default_session_duration(),
            region: None,
            issuer: default_issuer(),
            federation_url: default_federation_url(),
            console_url: default_console_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginConfig {
    /// Run `<command> sso login` when the current credentials are rejected
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_login_command")]
    pub command: String,
}

fn default_true() -> bool {
    true
}

fn default_login_command() -> String {
    crate::auth::DEFAULT_LOGIN_COMMAND.to_string()
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_login_command(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BrowserConfig {
    /// Print the sign-in URL instead of opening a browser
    #[serde(default)]
    pub print_only: bool,
}

/// Reject durations the federation endpoint would refuse
pub fn validate_session_duration(seconds: i32) -> Result<i32> {
    if (MIN_SESSION_DURATION..=MAX_SESSION_DURATION).contains(&seconds) {
        Ok(seconds)
    } else {
        Err(ConsoleError::ConfigError(format!(
            "session duration must be between {} and {} seconds, got {}",
            MIN_SESSION_DURATION, MAX_SESSION_DURATION, seconds
        )))
    }
}

const SAMPLE_CONFIG: &str = r#"# aws-console configuration
# Location priority:
#   1. $XDG_CONFIG_HOME/aws-console/config.toml (if XDG_CONFIG_HOME is set)
#   2. ~/.config/aws-console/config.toml (if ~/.config exists)
#   3. ~/.aws-console/config.toml (fallback)
#
# Command line flags override every value in this file.

[console]
# Console session length in seconds (900 - 43200)
session_duration = 43200

# Region the console opens in
# Example: region = "eu-west-1"

# Issuer shown on the AWS sign-in page
issuer = "aws-console-cli"

# Federation and console endpoints (change for GovCloud or China partitions)
federation_url = "https://signin.aws.amazon.com/federation"
console_url = "https://console.aws.amazon.com/"

[login]
# Run `aws sso login` when the current credentials are not valid
enabled = true

# AWS CLI executable used for the login
command = "aws"

[browser]
# Print the sign-in URL instead of opening a browser
print_only = false
"#;

impl Config {
    /// Get the config directory path
    ///
    /// Priority:
    /// 1. XDG_CONFIG_HOME/aws-console (if env var is set)
    /// 2. ~/.config/aws-console (if ~/.config exists)
    /// 3. ~/.aws-console (fallback on Unix, doesn't create ~/.config)
    /// 4. Platform default on Windows
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg_config.is_empty() {
                return Ok(PathBuf::from(xdg_config).join("aws-console"));
            }
        }

        #[cfg(unix)]
        {
            if let Some(home_dir) = dirs::home_dir() {
                let xdg_config = home_dir.join(".config");

                if xdg_config.exists() {
                    return Ok(xdg_config.join("aws-console"));
                }

                return Ok(home_dir.join(".aws-console"));
            }
        }

        #[cfg(not(unix))]
        {
            if let Some(config_dir) = dirs::config_dir() {
                return Ok(config_dir.join("aws-console"));
            }
        }

        Err(ConsoleError::ConfigError(
            "Could not determine config directory".to_string(),
        ))
    }

    /// Get the config file path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Config::default());
        }

        tracing::debug!("Loading config from: {}", config_path.display());
        let contents = fs::read_to_string(config_path)
            .map_err(|e| ConsoleError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConsoleError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        validate_session_duration(config.console.session_duration)?;

        Ok(config)
    }

    /// Create a sample config file with comments
    pub fn create_sample() -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        Self::create_sample_at(&config_path)?;
        Ok(config_path)
    }

    pub fn create_sample_at(config_path: &Path) -> Result<()> {
        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).map_err(|e| {
                    ConsoleError::ConfigError(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        // Don't overwrite existing config
        if config_path.exists() {
            return Err(ConsoleError::ConfigError(format!(
                "Config file already exists at: {}",
                config_path.display()
            )));
        }

        fs::write(config_path, SAMPLE_CONFIG).map_err(|e| {
            ConsoleError::ConfigError(format!("Failed to write sample config: {}", e))
        })?;

        tracing::info!("Created sample config at: {}", config_path.display());
        Ok(())
    }

    /// Console destination, with the region selector when one is configured
    pub fn destination(&self) -> String {
        match self.console.region.as_deref().filter(|r| !r.is_empty()) {
            Some(region) => {
                let separator = if self.console.console_url.contains('?') {
                    '&'
                } else {
                    '?'
                };
                format!(
                    "{}{}region={}",
                    self.console.console_url, separator, region
                )
            }
            None => self.console.console_url.clone(),
        }
    }
}
