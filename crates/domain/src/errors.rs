use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DKIM selector: {0}")]
    InvalidSelector(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Domain does not exist: {0}")]
    NxDomain(String),

    #[error("Upstream server failure for {domain}: {rcode}")]
    ServerFailure { domain: String, rcode: &'static str },

    #[error("Timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("I/O error talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("All upstream DNS servers unreachable")]
    AllUpstreamsUnreachable,

    #[error("Failed to query DNS records for {0}")]
    TransportFailure(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("SPF already authorizes the mail service for {0}; nothing to generate")]
    GenerationSuppressed(String),
}

impl DomainError {
    /// True when the failure happened below the DNS protocol: the upstream
    /// never produced an answer at all.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportIo { .. }
                | DomainError::AllUpstreamsUnreachable
                | DomainError::TransportFailure(_)
        )
    }
}
