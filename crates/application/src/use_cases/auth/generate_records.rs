use mailauth_domain::config::MailServiceConfig;
use mailauth_domain::validators::{normalize_domain, validate_domain};
use mailauth_domain::{
    DkimValue, DomainError, GeneratePolicy, GeneratedRecordSet, RecordGenerator, Session,
    SessionError, SpfEvaluator,
};
use tracing::{debug, instrument};

/// Produces the records a domain owner has to publish.
pub struct GenerateRecordsUseCase {
    generator: RecordGenerator,
    policy: GeneratePolicy,
}

impl GenerateRecordsUseCase {
    pub fn new(config: &MailServiceConfig) -> Self {
        let generator = RecordGenerator::new(
            config.authorization_token.as_str(),
            config.dkim_selector.as_str(),
        )
        .with_host_convention(config.host_convention)
        .with_dmarc_aggregate_reports(config.dmarc_aggregate_reports);

        Self {
            generator,
            policy: config.generate_policy,
        }
    }

    pub fn generator(&self) -> &RecordGenerator {
        &self.generator
    }

    pub fn policy(&self) -> GeneratePolicy {
        self.policy
    }

    /// Stateless generation from values the caller already holds.
    ///
    /// Under `SuppressWhenAuthorized` an `existing_spf` that already carries
    /// the authorization token is refused with `GenerationSuppressed`.
    #[instrument(skip(self, dkim))]
    pub fn execute(
        &self,
        domain: &str,
        existing_spf: Option<&str>,
        dmarc_present: bool,
        dkim: &DkimValue,
    ) -> Result<GeneratedRecordSet, DomainError> {
        let domain = normalize_domain(domain).ok_or(DomainError::MissingParameter("domain"))?;
        validate_domain(&domain)?;

        if self.is_suppressed(existing_spf) {
            debug!(domain = %domain, "Generation suppressed, SPF already authorized");
            return Err(DomainError::GenerationSuppressed(domain));
        }

        if dkim.is_blank() {
            return Err(DomainError::MissingParameter("dkim_value"));
        }

        let records = self
            .generator
            .generate(&domain, existing_spf, dmarc_present, dkim);

        debug!(
            domain = %domain,
            spf_action = ?records.spf.action,
            dmarc = records.dmarc.is_some(),
            "Records generated"
        );

        Ok(records)
    }

    fn is_suppressed(&self, existing_spf: Option<&str>) -> bool {
        match (self.policy, existing_spf) {
            (GeneratePolicy::SuppressWhenAuthorized, Some(record)) => SpfEvaluator::new()
                .contains_token(record, self.generator.authorization_token()),
            _ => false,
        }
    }

    /// Moves a checked session to `Generated` under the configured policy.
    pub fn advance(&self, session: &Session) -> Result<Session, SessionError> {
        session.generate(&self.generator, self.policy)
    }
}
