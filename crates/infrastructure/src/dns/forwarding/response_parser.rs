use bytes::Bytes;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use mailauth_domain::{DomainError, MxRecord};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Character-strings of each TXT answer, in answer order.
    pub txt: Vec<Vec<String>>,

    /// CNAME targets without the trailing root dot.
    pub cname: Vec<String>,

    pub mx: Vec<MxRecord>,
}

impl DnsResponse {
    pub fn is_nodata(&self) -> bool {
        self.rcode == ResponseCode::NoError
            && self.txt.is_empty()
            && self.cname.is_empty()
            && self.mx.is_empty()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse_bytes(response_bytes: Bytes) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(&response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut txt = Vec::new();
        let mut cname = Vec::new();
        let mut mx = Vec::new();

        for record in message.answers() {
            match record.data() {
                RData::TXT(t) => {
                    let segments = t
                        .txt_data()
                        .iter()
                        .map(|s| String::from_utf8_lossy(s).into_owned())
                        .collect();
                    txt.push(segments);
                }
                RData::CNAME(canonical) => {
                    let name = canonical.to_utf8();
                    debug!(cname = %name, "CNAME record found");
                    cname.push(name.trim_end_matches('.').to_string());
                }
                RData::MX(m) => {
                    mx.push(MxRecord::new(m.preference(), m.exchange().to_utf8()));
                }
                _ => {}
            }
        }

        debug!(
            rcode = ?rcode,
            txt = txt.len(),
            cname = cname.len(),
            mx = mx.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            txt,
            cname,
            mx,
        })
    }

    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        Self::parse_bytes(Bytes::copy_from_slice(response_bytes))
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
