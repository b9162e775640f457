use mailauth_application::ports::DnsResolver;
use mailauth_application::use_cases::{
    CheckDomainUseCase, GenerateRecordsUseCase, LookupDkimUseCase, ResolveRecordsUseCase,
};
use mailauth_domain::config::MailServiceConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub resolve_records: Arc<ResolveRecordsUseCase>,
    pub lookup_dkim: Arc<LookupDkimUseCase>,
    pub check_domain: Arc<CheckDomainUseCase>,
    pub generate_records: Arc<GenerateRecordsUseCase>,
}

impl AppState {
    pub fn new(resolver: Arc<dyn DnsResolver>, mail_service: &MailServiceConfig) -> Self {
        let resolve_records = Arc::new(ResolveRecordsUseCase::new(Arc::clone(&resolver)));
        let check_domain = Arc::new(CheckDomainUseCase::new(
            Arc::clone(&resolve_records),
            mail_service.authorization_token.as_str(),
        ));

        Self {
            resolve_records,
            lookup_dkim: Arc::new(LookupDkimUseCase::new(resolver)),
            check_domain,
            generate_records: Arc::new(GenerateRecordsUseCase::new(mail_service)),
        }
    }
}
