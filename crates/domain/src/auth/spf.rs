use super::status::SpfStatus;
use super::tokenizer::{strip_quotes, RecordTokenizer, SimpleTokenizer};
use serde::Serialize;

pub const SPF_VERSION: &str = "v=spf1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpfTag {
    Version,
    Include,
    Ip,
    All,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpfQualifier {
    Pass,
    Fail,
    SoftFail,
    Neutral,
}

impl SpfQualifier {
    fn from_prefix(c: char) -> Option<Self> {
        match c {
            '+' => Some(SpfQualifier::Pass),
            '-' => Some(SpfQualifier::Fail),
            '~' => Some(SpfQualifier::SoftFail),
            '?' => Some(SpfQualifier::Neutral),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            SpfQualifier::Pass => '+',
            SpfQualifier::Fail => '-',
            SpfQualifier::SoftFail => '~',
            SpfQualifier::Neutral => '?',
        }
    }
}

/// One SPF term, tagged by prefix for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpfMechanismToken {
    pub value: String,
    pub tag: SpfTag,
    /// Only set on `all` terms.
    pub qualifier: Option<SpfQualifier>,
}

impl SpfMechanismToken {
    pub fn classify(term: &str) -> Self {
        let tag = if term.starts_with("v=") {
            SpfTag::Version
        } else if term.starts_with("include:") {
            SpfTag::Include
        } else if term.starts_with("ip4:") || term.starts_with("ip6:") {
            SpfTag::Ip
        } else if term.ends_with("all") {
            SpfTag::All
        } else {
            SpfTag::Unknown
        };

        let qualifier = match tag {
            SpfTag::All => term.chars().next().and_then(SpfQualifier::from_prefix),
            _ => None,
        };

        Self {
            value: term.to_string(),
            tag,
            qualifier,
        }
    }
}

/// What the evaluator found in a domain's apex TXT records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpfAnalysis {
    pub record: Option<String>,
    pub status: SpfStatus,
    pub tokens: Vec<SpfMechanismToken>,
    /// Every TXT record except the selected SPF record.
    pub other_txt: Vec<String>,
}

pub fn is_spf_record(record: &str) -> bool {
    strip_quotes(record).starts_with(SPF_VERSION)
}

#[derive(Debug, Clone, Default)]
pub struct SpfEvaluator<T: RecordTokenizer = SimpleTokenizer> {
    tokenizer: T,
}

impl SpfEvaluator<SimpleTokenizer> {
    pub fn new() -> Self {
        Self {
            tokenizer: SimpleTokenizer,
        }
    }
}

impl<T: RecordTokenizer> SpfEvaluator<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Position and quote-stripped content of the first SPF record.
    ///
    /// Later SPF records are a misconfiguration; they are left in place and
    /// never considered.
    pub fn find_record<'a>(&self, txt: &'a [String]) -> Option<(usize, &'a str)> {
        txt.iter()
            .enumerate()
            .find(|(_, record)| is_spf_record(record))
            .map(|(idx, record)| (idx, strip_quotes(record)))
    }

    /// Exact term equality; `include:a.example` does not match `include:a.example.`.
    pub fn contains_token(&self, record: &str, token: &str) -> bool {
        self.tokenizer.spf_terms(record).iter().any(|t| *t == token)
    }

    pub fn status(&self, record: Option<&str>, token: &str) -> SpfStatus {
        match record {
            None => SpfStatus::Absent,
            Some(r) if self.contains_token(r, token) => SpfStatus::PresentWithAuthorization,
            Some(_) => SpfStatus::PresentWithoutAuthorization,
        }
    }

    pub fn mechanisms(&self, record: &str) -> Vec<SpfMechanismToken> {
        self.tokenizer
            .spf_terms(record)
            .into_iter()
            .map(SpfMechanismToken::classify)
            .collect()
    }

    pub fn evaluate(&self, txt: &[String], token: &str) -> SpfAnalysis {
        let found = self.find_record(txt);
        let record = found.map(|(_, r)| r);

        let other_txt = txt
            .iter()
            .enumerate()
            .filter(|(idx, _)| found.map(|(selected, _)| selected) != Some(*idx))
            .map(|(_, r)| r.clone())
            .collect();

        SpfAnalysis {
            record: record.map(str::to_string),
            status: self.status(record, token),
            tokens: record.map(|r| self.mechanisms(r)).unwrap_or_default(),
            other_txt,
        }
    }
}
