use super::DnsTransport;
use async_trait::async_trait;
use bytes::Bytes;
use mailauth_domain::DomainError;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

/// DNS over TCP (RFC 1035 §4.2.2): every message carries a two-byte length prefix.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let io_error = |e: std::io::Error| DomainError::TransportIo {
            server: self.server_addr.to_string(),
            reason: e.to_string(),
        };

        let len = u16::try_from(message_bytes.len()).map_err(|_| DomainError::TransportIo {
            server: self.server_addr.to_string(),
            reason: format!("query too large: {} bytes", message_bytes.len()),
        })?;

        let mut stream = TcpStream::connect(self.server_addr)
            .await
            .map_err(io_error)?;

        let mut framed = Vec::with_capacity(message_bytes.len() + 2);
        framed.extend_from_slice(&len.to_be_bytes());
        framed.extend_from_slice(message_bytes);
        stream.write_all(&framed).await.map_err(io_error)?;

        let mut len_buf = [0u8; 2];
        stream.read_exact(&mut len_buf).await.map_err(io_error)?;
        let response_len = u16::from_be_bytes(len_buf) as usize;

        let mut response = vec![0u8; response_len];
        stream.read_exact(&mut response).await.map_err(io_error)?;

        Ok(response)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(&self, message_bytes: &[u8], deadline: Instant) -> Result<Bytes, DomainError> {
        let response = timeout_at(deadline, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        debug!(
            server = %self.server_addr,
            bytes_received = response.len(),
            "TCP response received"
        );

        Ok(Bytes::from(response))
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
