use async_trait::async_trait;
use mailauth_domain::{DnsQuery, DomainError, MxRecord};
use std::sync::Arc;

/// Answers to one query, already decoded from the wire.
///
/// A name that exists but has no records of the asked type resolves to an
/// empty `DnsResolution`. A name that does not exist is
/// [`DomainError::NxDomain`].
#[derive(Debug, Clone, Default)]
pub struct DnsResolution {
    /// One entry per TXT record, each the ordered list of its character-strings.
    pub txt: Vec<Vec<String>>,
    pub cname: Vec<String>,
    pub mx: Vec<MxRecord>,
    pub upstream_server: Option<Arc<str>>,
}

impl DnsResolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_txt<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.txt.push(segments.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_cname(mut self, target: impl Into<String>) -> Self {
        self.cname.push(target.into());
        self
    }

    pub fn with_mx(mut self, preference: u16, exchange: impl Into<String>) -> Self {
        self.mx.push(MxRecord::new(preference, exchange));
        self
    }

    pub fn from_upstream(mut self, server: impl Into<Arc<str>>) -> Self {
        self.upstream_server = Some(server.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.txt.is_empty() && self.cname.is_empty() && self.mx.is_empty()
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;
}
