use super::RecordType;
use std::sync::Arc;

/// DNS query (domain + record type).
/// Uses `Arc<str>` so lookups against the same name can share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    pub fn txt(domain: impl Into<Arc<str>>) -> Self {
        Self::new(domain, RecordType::TXT)
    }

    pub fn cname(domain: impl Into<Arc<str>>) -> Self {
        Self::new(domain, RecordType::CNAME)
    }

    pub fn mx(domain: impl Into<Arc<str>>) -> Self {
        Self::new(domain, RecordType::MX)
    }

    /// TXT query for the DMARC policy of `domain`.
    pub fn dmarc(domain: &str) -> Self {
        Self::txt(format!("_dmarc.{domain}"))
    }

    /// TXT query for the DKIM key published under `selector`.
    pub fn dkim(domain: &str, selector: &str) -> Self {
        Self::txt(format!("{selector}._domainkey.{domain}"))
    }
}
