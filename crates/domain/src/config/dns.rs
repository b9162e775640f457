use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Upstream resolution settings for the gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Recursive resolvers tried in order, as "ip:port"
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Per-attempt timeout in milliseconds (default: 2000)
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Re-ask over TCP when a UDP answer comes back truncated.
    /// Long DKIM keys routinely overflow a plain 512-byte UDP answer.
    #[serde(default = "default_true")]
    pub tcp_fallback: bool,
}

impl DnsConfig {
    pub fn upstream_addrs(&self) -> Result<Vec<SocketAddr>, String> {
        self.upstream_servers
            .iter()
            .map(|s| {
                s.parse::<SocketAddr>()
                    .map_err(|e| format!("Invalid upstream server '{}': {}", s, e))
            })
            .collect()
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            query_timeout: default_query_timeout(),
            tcp_fallback: true,
        }
    }
}

fn default_upstream_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}
