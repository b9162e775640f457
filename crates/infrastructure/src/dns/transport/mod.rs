pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use bytes::Bytes;
use mailauth_domain::DomainError;
use std::net::SocketAddr;
use tokio::time::Instant;

/// Trait for sending raw DNS messages over the wire
///
/// `deadline` bounds the whole exchange, send and receive together.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, message_bytes: &[u8], deadline: Instant) -> Result<Bytes, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport, so the resolver needs no boxing per attempt.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub fn udp(server_addr: SocketAddr) -> Self {
        Self::Udp(udp::UdpTransport::new(server_addr))
    }

    pub fn tcp(server_addr: SocketAddr) -> Self {
        Self::Tcp(tcp::TcpTransport::new(server_addr))
    }

    pub async fn send(&self, message_bytes: &[u8], deadline: Instant) -> Result<Bytes, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, deadline).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, deadline).await,
        }
    }

    /// Protocol name for logging.
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(t) => t.protocol_name(),
            Self::Tcp(t) => t.protocol_name(),
        }
    }
}
