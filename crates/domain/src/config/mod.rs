//! Configuration module for mailauth
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP binding and CORS
//! - `dns`: Upstream resolvers and query timeouts
//! - `mail_service`: The sending service being authorized and generation policy
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod dns;
pub mod errors;
pub mod logging;
pub mod mail_service;
pub mod root;
pub mod server;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use mail_service::{GeneratePolicy, HostConvention, MailServiceConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
