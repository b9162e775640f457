use super::DnsTransport;
use async_trait::async_trait;
use bytes::Bytes;
use mailauth_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP, one ephemeral socket per query.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn io_error(&self, e: std::io::Error) -> DomainError {
        DomainError::TransportIo {
            server: self.server_addr.to_string(),
            reason: e.to_string(),
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, message_bytes: &[u8], deadline: Instant) -> Result<Bytes, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.io_error(e))?;

        let bytes_sent = timeout_at(deadline, socket.send_to(message_bytes, self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) = timeout_at(deadline, socket.recv_from(&mut recv_buf))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(e))?;

        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(Bytes::from(recv_buf))
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
