use super::dmarc::DmarcTagToken;
use super::spf::{SpfEvaluator, SpfMechanismToken};
use super::tokenizer::RecordTokenizer;
use crate::DomainRecordBundle;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpfStatus {
    Absent,
    PresentWithoutAuthorization,
    PresentWithAuthorization,
}

impl SpfStatus {
    pub fn is_present(&self) -> bool {
        !matches!(self, SpfStatus::Absent)
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, SpfStatus::PresentWithAuthorization)
    }
}

/// Three independent judgments about one domain, recomputed on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthenticationStatus {
    pub spf: SpfStatus,
    #[serde(rename = "dmarc")]
    pub dmarc_present: bool,
    #[serde(rename = "mx")]
    pub mx_present: bool,
}

impl AuthenticationStatus {
    pub fn classify(bundle: &DomainRecordBundle, authorization_token: &str) -> Self {
        let evaluator = SpfEvaluator::new();
        let record = evaluator.find_record(&bundle.txt).map(|(_, r)| r);
        Self {
            spf: evaluator.status(record, authorization_token),
            dmarc_present: bundle.has_dmarc(),
            mx_present: bundle.has_mx(),
        }
    }

    pub fn is_fully_configured(&self) -> bool {
        self.spf.is_authorized() && self.dmarc_present && self.mx_present
    }
}

/// Everything a caller renders after a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainReport {
    pub domain: String,
    pub status: AuthenticationStatus,
    pub spf_record: Option<String>,
    pub spf_tokens: Vec<SpfMechanismToken>,
    pub other_txt: Vec<String>,
    pub dmarc_tags: Vec<DmarcTagToken>,
    pub records: DomainRecordBundle,
}

impl DomainReport {
    pub fn build<T: RecordTokenizer>(
        domain: impl Into<String>,
        bundle: DomainRecordBundle,
        authorization_token: &str,
        evaluator: &SpfEvaluator<T>,
    ) -> Self {
        let spf = evaluator.evaluate(&bundle.txt, authorization_token);

        let dmarc_tags = bundle
            .dmarc
            .first()
            .map(|record| {
                evaluator
                    .tokenizer()
                    .dmarc_tags(record)
                    .into_iter()
                    .map(DmarcTagToken::classify)
                    .collect()
            })
            .unwrap_or_default();

        let status = AuthenticationStatus {
            spf: spf.status,
            dmarc_present: bundle.has_dmarc(),
            mx_present: bundle.has_mx(),
        };

        Self {
            domain: domain.into(),
            status,
            spf_record: spf.record,
            spf_tokens: spf.tokens,
            other_txt: spf.other_txt,
            dmarc_tags,
            records: bundle,
        }
    }
}
