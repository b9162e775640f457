use super::spf::SPF_VERSION;
use super::tokenizer::{RecordTokenizer, SimpleTokenizer};
use crate::config::HostConvention;
use crate::RecordType;
use serde::{Deserialize, Serialize};

pub const DMARC_MONITOR_POLICY: &str = "v=DMARC1; p=none";
const DKIM_KEY_PREFIX: &str = "v=DKIM1; k=rsa; p=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Spf,
    Dkim,
    Dmarc,
}

/// What the domain owner has to do with a generated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordAction {
    /// Already published as shown.
    None,
    /// Replace the existing record with this value.
    Update,
    /// Publish a new record.
    Create,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedRecord {
    pub kind: RecordKind,
    pub host: String,
    pub record_type: RecordType,
    pub value: String,
    pub action: RecordAction,
}

/// Which shape the caller's DKIM value has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DkimForm {
    /// A complete record (`v=DKIM1; k=rsa; p=...`), published verbatim.
    #[default]
    Record,
    /// A bare base64 public key that still needs the DKIM tags around it.
    PublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkimValue {
    pub form: DkimForm,
    pub value: String,
}

impl DkimValue {
    pub fn record(value: impl Into<String>) -> Self {
        Self {
            form: DkimForm::Record,
            value: value.into(),
        }
    }

    pub fn public_key(value: impl Into<String>) -> Self {
        Self {
            form: DkimForm::PublicKey,
            value: value.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn render(&self) -> String {
        match self.form {
            DkimForm::Record => self.value.clone(),
            DkimForm::PublicKey => format!("{}{}", DKIM_KEY_PREFIX, self.value.trim()),
        }
    }
}

/// The records produced by one generate action. DMARC is `None` when the
/// domain already publishes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedRecordSet {
    pub spf: GeneratedRecord,
    pub dkim: GeneratedRecord,
    pub dmarc: Option<GeneratedRecord>,
}

impl GeneratedRecordSet {
    pub fn records(&self) -> impl Iterator<Item = &GeneratedRecord> {
        [Some(&self.spf), Some(&self.dkim), self.dmarc.as_ref()]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone)]
pub struct RecordGenerator<T: RecordTokenizer = SimpleTokenizer> {
    authorization_token: String,
    dkim_selector: String,
    host_convention: HostConvention,
    dmarc_aggregate_reports: bool,
    tokenizer: T,
}

impl RecordGenerator<SimpleTokenizer> {
    pub fn new(authorization_token: impl Into<String>, dkim_selector: impl Into<String>) -> Self {
        Self {
            authorization_token: authorization_token.into(),
            dkim_selector: dkim_selector.into(),
            host_convention: HostConvention::default(),
            dmarc_aggregate_reports: false,
            tokenizer: SimpleTokenizer,
        }
    }
}

impl<T: RecordTokenizer> RecordGenerator<T> {
    pub fn with_tokenizer<U: RecordTokenizer>(self, tokenizer: U) -> RecordGenerator<U> {
        RecordGenerator {
            authorization_token: self.authorization_token,
            dkim_selector: self.dkim_selector,
            host_convention: self.host_convention,
            dmarc_aggregate_reports: self.dmarc_aggregate_reports,
            tokenizer,
        }
    }

    pub fn with_host_convention(mut self, convention: HostConvention) -> Self {
        self.host_convention = convention;
        self
    }

    pub fn with_dmarc_aggregate_reports(mut self, enabled: bool) -> Self {
        self.dmarc_aggregate_reports = enabled;
        self
    }

    pub fn authorization_token(&self) -> &str {
        &self.authorization_token
    }

    pub fn dkim_selector(&self) -> &str {
        &self.dkim_selector
    }

    /// Merges the authorization token into `existing`.
    ///
    /// The token goes in front of the last term so a terminal `all` stays
    /// terminal. A single-term record gets the token appended; a blank record
    /// is handled like no record at all.
    pub fn merge_spf(&self, existing: Option<&str>) -> (String, RecordAction) {
        let token = self.authorization_token.as_str();

        let mut terms = match existing {
            Some(record) => self.tokenizer.spf_terms(record),
            None => Vec::new(),
        };

        if terms.is_empty() {
            return (format!("{SPF_VERSION} {token} ~all"), RecordAction::Create);
        }

        if terms.contains(&token) {
            let unchanged = existing.map(str::to_string).unwrap_or_default();
            return (unchanged, RecordAction::None);
        }

        if terms.len() == 1 {
            terms.push(token);
        } else {
            terms.insert(terms.len() - 1, token);
        }

        (terms.join(" "), RecordAction::Update)
    }

    pub fn spf(&self, domain: &str, existing: Option<&str>) -> GeneratedRecord {
        let (value, action) = self.merge_spf(existing);
        GeneratedRecord {
            kind: RecordKind::Spf,
            host: self.host_convention.host(None, domain),
            record_type: RecordType::TXT,
            value,
            action,
        }
    }

    pub fn dkim(&self, domain: &str, dkim: &DkimValue) -> GeneratedRecord {
        let label = format!("{}._domainkey", self.dkim_selector);
        GeneratedRecord {
            kind: RecordKind::Dkim,
            host: self.host_convention.host(Some(&label), domain),
            record_type: RecordType::TXT,
            value: dkim.render(),
            action: RecordAction::Create,
        }
    }

    pub fn dmarc(&self, domain: &str, dmarc_present: bool) -> Option<GeneratedRecord> {
        if dmarc_present {
            return None;
        }

        let value = if self.dmarc_aggregate_reports {
            format!("{DMARC_MONITOR_POLICY}; rua=mailto:dmarc-reports@{domain}")
        } else {
            DMARC_MONITOR_POLICY.to_string()
        };

        Some(GeneratedRecord {
            kind: RecordKind::Dmarc,
            host: self.host_convention.host(Some("_dmarc"), domain),
            record_type: RecordType::TXT,
            value,
            action: RecordAction::Create,
        })
    }

    pub fn generate(
        &self,
        domain: &str,
        existing_spf: Option<&str>,
        dmarc_present: bool,
        dkim: &DkimValue,
    ) -> GeneratedRecordSet {
        GeneratedRecordSet {
            spf: self.spf(domain, existing_spf),
            dkim: self.dkim(domain, dkim),
            dmarc: self.dmarc(domain, dmarc_present),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "include:spfa.mailendo.com";

    fn generator() -> RecordGenerator {
        RecordGenerator::new(TOKEN, "ms")
    }

    // ============================================================================
    // SPF merge
    // ============================================================================

    #[test]
    fn test_no_record_creates_soft_fail() {
        let (value, action) = generator().merge_spf(None);
        assert_eq!(value, "v=spf1 include:spfa.mailendo.com ~all");
        assert_eq!(action, RecordAction::Create);
    }

    #[test]
    fn test_blank_record_treated_as_absent() {
        let (value, action) = generator().merge_spf(Some("   "));
        assert_eq!(value, "v=spf1 include:spfa.mailendo.com ~all");
        assert_eq!(action, RecordAction::Create);
    }

    #[test]
    fn test_authorized_record_unchanged() {
        let existing = "v=spf1 include:spfa.mailendo.com -all";
        let (value, action) = generator().merge_spf(Some(existing));
        assert_eq!(value, existing);
        assert_eq!(action, RecordAction::None);
    }

    #[test]
    fn test_insert_before_terminal_all() {
        let (value, action) = generator().merge_spf(Some("v=spf1 ip4:1.2.3.0/24 ~all"));
        assert_eq!(value, "v=spf1 ip4:1.2.3.0/24 include:spfa.mailendo.com ~all");
        assert_eq!(action, RecordAction::Update);
    }

    #[test]
    fn test_insert_preserves_relative_order() {
        let existing = "v=spf1 include:_spf.google.com mx a ip4:10.0.0.1 -all";
        let (value, _) = generator().merge_spf(Some(existing));
        let terms: Vec<&str> = value.split(' ').collect();

        assert_eq!(terms[terms.len() - 2], TOKEN);
        assert_eq!(terms[terms.len() - 1], "-all");

        let without: Vec<&str> = terms.iter().copied().filter(|t| *t != TOKEN).collect();
        let original: Vec<&str> = existing.split(' ').collect();
        assert_eq!(without, original);
    }

    #[test]
    fn test_single_term_record_appends() {
        let (value, action) = generator().merge_spf(Some("v=spf1"));
        assert_eq!(value, "v=spf1 include:spfa.mailendo.com");
        assert_eq!(action, RecordAction::Update);
    }

    #[test]
    fn test_record_without_all_inserts_before_last() {
        let (value, _) = generator().merge_spf(Some("v=spf1 mx redirect=_spf.example.com"));
        assert_eq!(
            value,
            "v=spf1 mx include:spfa.mailendo.com redirect=_spf.example.com"
        );
    }

    #[test]
    fn test_messy_spacing_is_normalized_on_update() {
        let (value, _) = generator().merge_spf(Some("  v=spf1   mx  ~all "));
        assert_eq!(value, "v=spf1 mx include:spfa.mailendo.com ~all");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let inputs = [
            None,
            Some("v=spf1 ~all"),
            Some("v=spf1"),
            Some("v=spf1 ip4:1.2.3.0/24 include:other.example ?all"),
            Some("v=spf1 include:spfa.mailendo.com ~all"),
        ];
        let generator = generator();
        for input in inputs {
            let (once, _) = generator.merge_spf(input);
            let (twice, action) = generator.merge_spf(Some(&once));
            assert_eq!(once, twice, "input {:?}", input);
            assert_eq!(action, RecordAction::None);
        }
    }

    // ============================================================================
    // DKIM
    // ============================================================================

    #[test]
    fn test_dkim_record_verbatim() {
        let value = "v=DKIM1; k=rsa; p=MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQC";
        let record = generator().dkim("example.com", &DkimValue::record(value));
        assert_eq!(record.host, "ms._domainkey");
        assert_eq!(record.value, value);
        assert_eq!(record.record_type, RecordType::TXT);
    }

    #[test]
    fn test_dkim_public_key_wrapped() {
        let record = generator().dkim("example.com", &DkimValue::public_key(" MIGfMA0GCS \n"));
        assert_eq!(record.value, "v=DKIM1; k=rsa; p=MIGfMA0GCS");
    }

    #[test]
    fn test_dkim_fully_qualified_host() {
        let record = generator()
            .with_host_convention(HostConvention::FullyQualified)
            .dkim("example.com", &DkimValue::record("v=DKIM1; p=abc"));
        assert_eq!(record.host, "ms._domainkey.example.com");
    }

    #[test]
    fn test_dkim_blank_detection() {
        assert!(DkimValue::record("  ").is_blank());
        assert!(!DkimValue::public_key("abc").is_blank());
    }

    // ============================================================================
    // DMARC
    // ============================================================================

    #[test]
    fn test_dmarc_omitted_when_present() {
        for domain in ["example.com", "mail.example.org", "x.io"] {
            assert!(generator().dmarc(domain, true).is_none());
        }
    }

    #[test]
    fn test_dmarc_monitor_policy_when_absent() {
        for domain in ["example.com", "mail.example.org", "x.io"] {
            let record = generator().dmarc(domain, false).unwrap();
            assert_eq!(record.host, "_dmarc");
            assert_eq!(record.value, "v=DMARC1; p=none");
        }
    }

    #[test]
    fn test_dmarc_with_aggregate_reports() {
        let record = generator()
            .with_dmarc_aggregate_reports(true)
            .dmarc("example.com", false)
            .unwrap();
        assert_eq!(
            record.value,
            "v=DMARC1; p=none; rua=mailto:dmarc-reports@example.com"
        );
    }

    // ============================================================================
    // Full set
    // ============================================================================

    #[test]
    fn test_generate_partial_domain() {
        let set = generator().generate(
            "example.com",
            Some("v=spf1 ip4:1.2.3.0/24 ~all"),
            false,
            &DkimValue::record("v=DKIM1; k=rsa; p=KEY"),
        );

        assert_eq!(
            set.spf.value,
            "v=spf1 ip4:1.2.3.0/24 include:spfa.mailendo.com ~all"
        );
        assert_eq!(set.spf.host, "@");
        assert!(set.dmarc.is_some());
        assert_eq!(set.records().count(), 3);
    }

    #[test]
    fn test_generate_fully_configured_domain() {
        let existing = "v=spf1 include:spfa.mailendo.com ~all";
        let set = generator().generate(
            "example.com",
            Some(existing),
            true,
            &DkimValue::record("v=DKIM1; k=rsa; p=KEY"),
        );

        assert_eq!(set.spf.value, existing);
        assert_eq!(set.spf.action, RecordAction::None);
        assert!(set.dmarc.is_none());
        let kinds: Vec<RecordKind> = set.records().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RecordKind::Spf, RecordKind::Dkim]);
    }

    #[test]
    fn test_custom_tokenizer_is_used() {
        struct CommaTokenizer;
        impl RecordTokenizer for CommaTokenizer {
            fn spf_terms<'a>(&self, record: &'a str) -> Vec<&'a str> {
                record.split(',').filter(|t| !t.is_empty()).collect()
            }
            fn dmarc_tags<'a>(&self, record: &'a str) -> Vec<&'a str> {
                record.split(';').collect()
            }
        }

        let generator = generator().with_tokenizer(CommaTokenizer);
        let (value, _) = generator.merge_spf(Some("v=spf1,mx,-all"));
        assert_eq!(value, "v=spf1 mx include:spfa.mailendo.com -all");
    }
}
