use mailauth_domain::record_bundle::join_txt_segments;
use mailauth_domain::validators::{normalize_domain, validate_domain, validate_selector};
use mailauth_domain::{DnsQuery, DomainError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::ports::DnsResolver;

pub struct LookupDkimUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl LookupDkimUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// TXT records published at `<selector>._domainkey.<domain>`, segments joined.
    ///
    /// Blank input is `MissingParameter`. Every other failure, including a
    /// malformed name and an empty answer, is `NotFound`.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str, selector: &str) -> Result<Vec<String>, DomainError> {
        let domain = normalize_domain(domain).ok_or(DomainError::MissingParameter("domain"))?;
        let selector =
            normalize_domain(selector).ok_or(DomainError::MissingParameter("selector"))?;

        let query = DnsQuery::dkim(&domain, &selector);
        let not_found = || DomainError::NotFound(query.domain.to_string());

        if let Err(e) = validate_domain(&domain).and_then(|_| validate_selector(&selector)) {
            debug!(error = %e, "Rejected DKIM lookup");
            return Err(not_found());
        }

        let resolution = self.resolver.resolve(&query).await.map_err(|e| {
            debug!(name = %query.domain, error = %e, "DKIM lookup failed");
            not_found()
        })?;

        let records: Vec<String> = resolution
            .txt
            .iter()
            .map(|segments| join_txt_segments(segments))
            .collect();

        if records.is_empty() {
            debug!(name = %query.domain, "No DKIM record published");
            return Err(not_found());
        }

        info!(name = %query.domain, count = records.len(), "DKIM record found");
        Ok(records)
    }
}
