#![allow(dead_code)]
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub const TYPE_CNAME: u16 = 5;
pub const TYPE_MX: u16 = 15;
pub const TYPE_TXT: u16 = 16;

const RCODE_SERVFAIL: u8 = 2;
const RCODE_NXDOMAIN: u8 = 3;

#[derive(Debug, Clone)]
pub enum MockRecord {
    Txt(Vec<String>),
    Mx(u16, String),
    Cname(String),
}

impl MockRecord {
    pub fn txt(segments: &[&str]) -> Self {
        MockRecord::Txt(segments.iter().map(|s| s.to_string()).collect())
    }

    pub fn mx(preference: u16, exchange: &str) -> Self {
        MockRecord::Mx(preference, exchange.to_string())
    }

    pub fn cname(target: &str) -> Self {
        MockRecord::Cname(target.to_string())
    }

    fn type_code(&self) -> u16 {
        match self {
            MockRecord::Txt(_) => TYPE_TXT,
            MockRecord::Mx(..) => TYPE_MX,
            MockRecord::Cname(_) => TYPE_CNAME,
        }
    }

    fn rdata(&self) -> Vec<u8> {
        match self {
            MockRecord::Txt(segments) => {
                let mut out = Vec::new();
                for segment in segments {
                    out.push(segment.len() as u8);
                    out.extend_from_slice(segment.as_bytes());
                }
                out
            }
            MockRecord::Mx(preference, exchange) => {
                let mut out = preference.to_be_bytes().to_vec();
                out.extend(encode_name(exchange));
                out
            }
            MockRecord::Cname(target) => encode_name(target),
        }
    }
}

/// What the mock server knows. Names not listed answer NXDOMAIN unless
/// another record type exists for them (then NODATA).
#[derive(Debug, Clone, Default)]
pub struct MockZone {
    records: HashMap<String, Vec<MockRecord>>,
    servfail: bool,
    truncate_udp: bool,
    hang_tcp: bool,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, name: &str, record: MockRecord) -> Self {
        self.records
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(record);
        self
    }

    /// Every query answers SERVFAIL.
    pub fn servfail(mut self) -> Self {
        self.servfail = true;
        self
    }

    /// UDP answers come back empty with the TC bit; TCP answers in full.
    pub fn truncate_udp(mut self) -> Self {
        self.truncate_udp = true;
        self
    }

    /// TCP connections are accepted and read, but never answered.
    pub fn hang_tcp(mut self) -> Self {
        self.hang_tcp = true;
        self
    }

    /// Wire answer to `query`, or `None` when the query cannot be parsed.
    pub fn respond(&self, query: &[u8], via_tcp: bool) -> Option<Vec<u8>> {
        let question = Question::parse(query)?;

        let (rcode, answers): (u8, Vec<&MockRecord>) = if self.servfail {
            (RCODE_SERVFAIL, Vec::new())
        } else {
            match self.records.get(&question.name) {
                None => (RCODE_NXDOMAIN, Vec::new()),
                Some(records) => (
                    0,
                    records
                        .iter()
                        .filter(|r| r.type_code() == question.qtype || r.type_code() == TYPE_CNAME)
                        .collect(),
                ),
            }
        };

        let truncated = self.truncate_udp && !via_tcp;
        let answers = if truncated { Vec::new() } else { answers };

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&query[0..2]); // Transaction ID
        // QR=1, RD=1, TC when truncated
        response.push(0x81 | if truncated { 0x02 } else { 0x00 });
        response.push(0x80 | rcode); // RA=1
        response.extend_from_slice(&[0x00, 0x01]); // Questions: 1
        response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // Authority, Additional

        response.extend_from_slice(question.wire);

        for record in answers {
            let rdata = record.rdata();
            response.extend_from_slice(&[0xc0, 0x0c]); // Name pointer to question
            response.extend_from_slice(&record.type_code().to_be_bytes());
            response.extend_from_slice(&[0x00, 0x01]); // Class IN
            response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]); // TTL: 60 seconds
            response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            response.extend_from_slice(&rdata);
        }

        Some(response)
    }
}

struct Question<'a> {
    name: String,
    qtype: u16,
    /// The question section exactly as the client sent it.
    wire: &'a [u8],
}

impl<'a> Question<'a> {
    fn parse(query: &'a [u8]) -> Option<Self> {
        let mut pos = 12;
        let mut labels = Vec::new();
        loop {
            let len = *query.get(pos)? as usize;
            pos += 1;
            if len == 0 {
                break;
            }
            let label = query.get(pos..pos + len)?;
            labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
            pos += len;
        }
        let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
        let end = pos + 4;
        Some(Self {
            name: labels.join("."),
            qtype,
            wire: query.get(12..end)?,
        })
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// In-process DNS server answering from a [`MockZone`] over UDP and TCP.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(zone: MockZone) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;
        let zone = Arc::new(zone);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = zone.respond(&buf[..len], false) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    result = listener.accept() => {
                        if let Ok((stream, _)) = result {
                            tokio::spawn(serve_tcp(stream, Arc::clone(&zone)));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve_tcp(mut stream: tokio::net::TcpStream, zone: Arc<MockZone>) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut query).await.is_err() {
        return;
    }
    if zone.hang_tcp {
        let _held = &stream;
        std::future::pending::<()>().await;
    }
    if let Some(response) = zone.respond(&query, true) {
        let mut framed = (response.len() as u16).to_be_bytes().to_vec();
        framed.extend_from_slice(&response);
        let _ = stream.write_all(&framed).await;
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// A UDP socket that swallows every query, for timeout paths.
pub struct SilentDnsServer {
    socket: UdpSocket,
}

impl SilentDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        Ok(Self {
            socket: UdpSocket::bind("127.0.0.1:0").await?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.socket
            .local_addr()
            .expect("bound socket has a local address")
    }
}
