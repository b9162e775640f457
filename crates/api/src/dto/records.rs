use mailauth_domain::DomainRecordBundle;
use serde::{Deserialize, Serialize};

/// `?domain=` for the record-bundle endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainParams {
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DkimLookupParams {
    pub domain: Option<String>,
    pub selector: Option<String>,
}

/// Response DTO for `/dns-query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecordsResponse {
    pub txt: Vec<String>,
    pub cname: Vec<String>,
    pub dmarc: Vec<String>,
    /// "<preference> <exchange>"
    pub mx: Vec<String>,
}

impl From<DomainRecordBundle> for DnsRecordsResponse {
    fn from(bundle: DomainRecordBundle) -> Self {
        Self {
            mx: bundle.mx.iter().map(ToString::to_string).collect(),
            txt: bundle.txt,
            cname: bundle.cname,
            dmarc: bundle.dmarc,
        }
    }
}

/// Response DTO for `/dkim-lookup`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DkimLookupResponse {
    pub record: Vec<String>,
}
