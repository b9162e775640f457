use crate::MxRecord;
use serde::Serialize;

/// Everything one resolution pass learned about a domain.
///
/// Every sequence is empty (never absent) when its lookup produced no
/// records or failed; transport failure of the whole pass is reported
/// through `DomainError` instead of through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainRecordBundle {
    /// TXT records at the apex, segments already joined with a single space.
    pub txt: Vec<String>,
    pub cname: Vec<String>,
    /// TXT records at `_dmarc.<domain>`.
    pub dmarc: Vec<String>,
    pub mx: Vec<MxRecord>,
}

impl DomainRecordBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_txt<I, S>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.txt = records.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dmarc<I, S>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dmarc = records.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cname<I, S>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cname = records.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mx(mut self, records: Vec<MxRecord>) -> Self {
        self.mx = records;
        self
    }

    pub fn has_dmarc(&self) -> bool {
        !self.dmarc.is_empty()
    }

    /// A lone null MX (`0 .`) declares that the domain takes no mail.
    pub fn has_mx(&self) -> bool {
        self.mx.iter().any(|mx| !mx.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.txt.is_empty() && self.cname.is_empty() && self.dmarc.is_empty() && self.mx.is_empty()
    }
}

/// Joins the character-string segments of one TXT record, keeping their order.
pub fn join_txt_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}
