use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::transport::Transport;
use async_trait::async_trait;
use mailauth_application::ports::{DnsResolution, DnsResolver};
use mailauth_domain::config::DnsConfig;
use mailauth_domain::{DnsQuery, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Stub resolver over the configured recursive upstreams.
///
/// Upstreams are tried in order; the next one is asked only when the
/// previous one did not answer or answered with a server error.
pub struct HickoryDnsResolver {
    upstreams: Vec<SocketAddr>,
    query_timeout: Duration,
    tcp_fallback: bool,
}

impl HickoryDnsResolver {
    pub fn new(
        upstreams: Vec<SocketAddr>,
        query_timeout_ms: u64,
        tcp_fallback: bool,
    ) -> Result<Self, DomainError> {
        if upstreams.is_empty() {
            return Err(DomainError::AllUpstreamsUnreachable);
        }

        Ok(Self {
            upstreams,
            query_timeout: Duration::from_millis(query_timeout_ms),
            tcp_fallback,
        })
    }

    pub fn from_config(config: &DnsConfig) -> Result<Self, DomainError> {
        let upstreams = config
            .upstream_addrs()
            .map_err(DomainError::InvalidDnsResponse)?;
        Self::new(upstreams, config.query_timeout, config.tcp_fallback)
    }

    pub fn upstreams(&self) -> &[SocketAddr] {
        &self.upstreams
    }

    /// One attempt against `server`, bounded by a single deadline that also
    /// covers the TCP retry of a truncated answer.
    async fn query_server(
        &self,
        server: SocketAddr,
        query_bytes: &[u8],
        id: u16,
    ) -> Result<DnsResponse, DomainError> {
        let deadline = Instant::now() + self.query_timeout;

        let udp = Transport::udp(server);
        let response = ResponseParser::parse_bytes(udp.send(query_bytes, deadline).await?)?;
        check_id(&response, id)?;

        if !(response.truncated && self.tcp_fallback) {
            debug!(server = %server, protocol = udp.protocol_name(), "Answer received");
            return Ok(response);
        }

        if Instant::now() >= deadline {
            debug!(server = %server, "Response truncated, no time left for TCP retry");
            return Ok(response);
        }

        let tcp = Transport::tcp(server);
        debug!(
            server = %server,
            protocol = tcp.protocol_name(),
            "Response truncated (TC bit), retrying"
        );

        let response = ResponseParser::parse_bytes(tcp.send(query_bytes, deadline).await?)?;
        check_id(&response, id)?;

        Ok(response)
    }
}

fn check_id(response: &DnsResponse, id: u16) -> Result<(), DomainError> {
    if response.id != id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "response ID {} does not match query ID {}",
            response.id, id
        )));
    }
    Ok(())
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let (id, query_bytes) = MessageBuilder::build_query_with_id(&query.domain, &query.record_type)?;

        // An answer of any kind beats "unreachable" when reporting the failure.
        let mut answered_error: Option<DomainError> = None;

        for server in &self.upstreams {
            let response = match self.query_server(*server, &query_bytes, id).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        server = %server,
                        domain = %query.domain,
                        record_type = %query.record_type,
                        error = %e,
                        "Upstream query failed"
                    );
                    if !e.is_transport() {
                        answered_error = Some(e);
                    }
                    continue;
                }
            };

            if response.is_nxdomain() {
                return Err(DomainError::NxDomain(query.domain.to_string()));
            }

            if response.is_server_error() {
                let rcode = ResponseParser::rcode_to_status(response.rcode);
                warn!(
                    server = %server,
                    domain = %query.domain,
                    rcode = rcode,
                    "Upstream returned server error"
                );
                answered_error = Some(DomainError::ServerFailure {
                    domain: query.domain.to_string(),
                    rcode,
                });
                continue;
            }

            debug!(
                server = %server,
                domain = %query.domain,
                record_type = %query.record_type,
                nodata = response.is_nodata(),
                "Upstream answered"
            );

            return Ok(DnsResolution {
                txt: response.txt,
                cname: response.cname,
                mx: response.mx,
                upstream_server: Some(Arc::from(server.to_string())),
            });
        }

        Err(answered_error.unwrap_or(DomainError::AllUpstreamsUnreachable))
    }
}
