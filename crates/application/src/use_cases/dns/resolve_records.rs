use mailauth_domain::record_bundle::join_txt_segments;
use mailauth_domain::validators::{normalize_domain, validate_domain};
use mailauth_domain::{DnsQuery, DomainError, DomainRecordBundle};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::ports::{DnsResolution, DnsResolver};

/// One resolution pass: TXT, CNAME, `_dmarc` TXT and MX for a domain.
pub struct ResolveRecordsUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl ResolveRecordsUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Lookups that fail are reported as empty sequences. The pass fails only
    /// when none of the four lookups got an answer from any upstream.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<DomainRecordBundle, DomainError> {
        let domain = normalize_domain(domain).ok_or(DomainError::MissingParameter("domain"))?;
        validate_domain(&domain)?;

        let name: Arc<str> = Arc::from(domain.as_str());
        let txt_query = DnsQuery::txt(Arc::clone(&name));
        let cname_query = DnsQuery::cname(Arc::clone(&name));
        let dmarc_query = DnsQuery::dmarc(&domain);
        let mx_query = DnsQuery::mx(name);

        let (txt, cname, dmarc, mx) = tokio::join!(
            self.resolver.resolve(&txt_query),
            self.resolver.resolve(&cname_query),
            self.resolver.resolve(&dmarc_query),
            self.resolver.resolve(&mx_query),
        );

        let unreachable = [&txt, &cname, &dmarc, &mx]
            .iter()
            .all(|r| matches!(r, Err(e) if e.is_transport()));
        if unreachable {
            warn!(domain = %domain, "No lookup reached an upstream server");
            return Err(DomainError::TransportFailure(domain));
        }

        let txt = absorb(&txt_query, txt);
        let cname = absorb(&cname_query, cname);
        let dmarc = absorb(&dmarc_query, dmarc);
        let mx = absorb(&mx_query, mx);

        let bundle = DomainRecordBundle::new()
            .with_txt(txt.txt.iter().map(|segments| join_txt_segments(segments)))
            .with_cname(cname.cname)
            .with_dmarc(dmarc.txt.iter().map(|segments| join_txt_segments(segments)))
            .with_mx(mx.mx);

        info!(
            domain = %domain,
            txt = bundle.txt.len(),
            cname = bundle.cname.len(),
            dmarc = bundle.dmarc.len(),
            mx = bundle.mx.len(),
            "Resolution pass complete"
        );

        Ok(bundle)
    }
}

fn absorb(query: &DnsQuery, result: Result<DnsResolution, DomainError>) -> DnsResolution {
    match result {
        Ok(resolution) => {
            debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                upstream = ?resolution.upstream_server,
                "Lookup answered"
            );
            resolution
        }
        Err(DomainError::NxDomain(_)) => {
            debug!(domain = %query.domain, record_type = %query.record_type, "NXDOMAIN");
            DnsResolution::default()
        }
        Err(e) => {
            warn!(
                domain = %query.domain,
                record_type = %query.record_type,
                error = %e,
                "Lookup failed, treating as no records"
            );
            DnsResolution::default()
        }
    }
}
