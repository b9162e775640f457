use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ConfigError, DnsConfig, LoggingConfig, MailServiceConfig, ServerConfig};
use crate::validators::validate_selector;

const DEFAULT_CONFIG_FILE: &str = "mailauth.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub mail_service: MailServiceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream_servers: Option<Vec<String>>,
    pub dkim_selector: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads `config_path`, or `mailauth.toml` from the working directory when
    /// present, or the built-in defaults; then applies `overrides`.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(path, &content)
    }

    pub fn from_toml(path: &str, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(servers) = overrides.upstream_servers {
            self.dns.upstream_servers = servers;
        }
        if let Some(selector) = overrides.dkim_selector {
            self.mail_service.dkim_selector = selector;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Validation(
                "server.web_port cannot be 0".to_string(),
            ));
        }

        if self.dns.upstream_servers.is_empty() {
            return Err(ConfigError::Validation(
                "dns.upstream_servers must list at least one server".to_string(),
            ));
        }
        self.dns.upstream_addrs().map_err(ConfigError::Validation)?;

        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "dns.query_timeout must be greater than 0".to_string(),
            ));
        }

        let token = &self.mail_service.authorization_token;
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "mail_service.authorization_token must be a single SPF term, got '{}'",
                token
            )));
        }

        validate_selector(&self.mail_service.dkim_selector)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(())
    }
}
