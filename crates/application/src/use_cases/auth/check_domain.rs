use mailauth_domain::validators::normalize_domain;
use mailauth_domain::{DomainError, DomainReport, SpfEvaluator};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::use_cases::dns::ResolveRecordsUseCase;

/// Resolves a domain and classifies what it already publishes.
pub struct CheckDomainUseCase {
    resolve: Arc<ResolveRecordsUseCase>,
    evaluator: SpfEvaluator,
    authorization_token: Arc<str>,
}

impl CheckDomainUseCase {
    pub fn new(resolve: Arc<ResolveRecordsUseCase>, authorization_token: impl Into<Arc<str>>) -> Self {
        Self {
            resolve,
            evaluator: SpfEvaluator::new(),
            authorization_token: authorization_token.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<DomainReport, DomainError> {
        let domain = normalize_domain(domain).ok_or(DomainError::MissingParameter("domain"))?;
        let bundle = self.resolve.execute(&domain).await?;

        let report = DomainReport::build(
            domain,
            bundle,
            &self.authorization_token,
            &self.evaluator,
        );

        info!(
            domain = %report.domain,
            spf = ?report.status.spf,
            dmarc = report.status.dmarc_present,
            mx = report.status.mx_present,
            "Domain checked"
        );

        Ok(report)
    }
}
